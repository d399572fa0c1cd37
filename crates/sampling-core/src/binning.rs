//! Motion-trajectory binning.
//!
//! Maps the three continuous trajectory features onto small ordinal
//! alphabets so the weight engine can treat camera motion as categorical.
//! Thresholds are left-closed/right-open with an unbounded top bin;
//! `trajTurns` boundaries are inclusive. Non-finite input lands in the
//! lowest bin (the caller reports how often that happened).

use std::fmt;

use clipsift_clip_model::ClipRecord;

/// Magnitude alphabet for `moveDist` and `rotAngle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MagnitudeBin {
    S,
    M,
    L,
    Xl,
}

impl MagnitudeBin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MagnitudeBin::S => "S",
            MagnitudeBin::M => "M",
            MagnitudeBin::L => "L",
            MagnitudeBin::Xl => "XL",
        }
    }
}

impl fmt::Display for MagnitudeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn-count alphabet for `trajTurns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TurnBin {
    Zero,
    One,
    Two,
    ThreePlus,
}

impl TurnBin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnBin::Zero => "0",
            TurnBin::One => "1",
            TurnBin::Two => "2",
            TurnBin::ThreePlus => "3+",
        }
    }
}

impl fmt::Display for TurnBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bin camera translation magnitude.
pub fn bin_move_dist(x: f64) -> MagnitudeBin {
    if !x.is_finite() {
        return MagnitudeBin::S;
    }
    if x < 0.5 {
        MagnitudeBin::S
    } else if x < 3.0 {
        MagnitudeBin::M
    } else if x < 8.0 {
        MagnitudeBin::L
    } else {
        MagnitudeBin::Xl
    }
}

/// Bin camera rotation magnitude.
pub fn bin_rot_angle(x: f64) -> MagnitudeBin {
    if !x.is_finite() {
        return MagnitudeBin::S;
    }
    if x < 0.5 {
        MagnitudeBin::S
    } else if x < 1.5 {
        MagnitudeBin::M
    } else if x < 3.0 {
        MagnitudeBin::L
    } else {
        MagnitudeBin::Xl
    }
}

/// Bin trajectory turn count. Boundaries are inclusive.
pub fn bin_traj_turns(x: f64) -> TurnBin {
    if !x.is_finite() {
        return TurnBin::Zero;
    }
    if x <= 0.0 {
        TurnBin::Zero
    } else if x <= 1.0 {
        TurnBin::One
    } else if x <= 2.0 {
        TurnBin::Two
    } else {
        TurnBin::ThreePlus
    }
}

/// The three trajectory bins of one clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionBins {
    pub move_bin: MagnitudeBin,
    pub rot_bin: MagnitudeBin,
    pub turn_bin: TurnBin,
}

impl MotionBins {
    pub fn for_record(record: &ClipRecord) -> Self {
        Self {
            move_bin: bin_move_dist(record.move_dist),
            rot_bin: bin_rot_angle(record.rot_angle),
            turn_bin: bin_traj_turns(record.traj_turns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_dist_thresholds() {
        assert_eq!(bin_move_dist(0.0), MagnitudeBin::S);
        assert_eq!(bin_move_dist(0.49), MagnitudeBin::S);
        assert_eq!(bin_move_dist(0.5), MagnitudeBin::M);
        assert_eq!(bin_move_dist(2.99), MagnitudeBin::M);
        assert_eq!(bin_move_dist(3.0), MagnitudeBin::L);
        assert_eq!(bin_move_dist(8.0), MagnitudeBin::Xl);
        assert_eq!(bin_move_dist(1e9), MagnitudeBin::Xl);
    }

    #[test]
    fn rot_angle_thresholds() {
        assert_eq!(bin_rot_angle(0.0), MagnitudeBin::S);
        assert_eq!(bin_rot_angle(0.5), MagnitudeBin::M);
        assert_eq!(bin_rot_angle(1.5), MagnitudeBin::L);
        assert_eq!(bin_rot_angle(2.99), MagnitudeBin::L);
        assert_eq!(bin_rot_angle(3.0), MagnitudeBin::Xl);
    }

    #[test]
    fn traj_turns_boundaries_are_inclusive() {
        assert_eq!(bin_traj_turns(0.0), TurnBin::Zero);
        assert_eq!(bin_traj_turns(-1.0), TurnBin::Zero);
        assert_eq!(bin_traj_turns(1.0), TurnBin::One);
        assert_eq!(bin_traj_turns(2.0), TurnBin::Two);
        assert_eq!(bin_traj_turns(2.01), TurnBin::ThreePlus);
        assert_eq!(bin_traj_turns(7.0), TurnBin::ThreePlus);
    }

    #[test]
    fn non_finite_lands_in_the_lowest_bin() {
        assert_eq!(bin_move_dist(f64::NAN), MagnitudeBin::S);
        assert_eq!(bin_rot_angle(f64::INFINITY), MagnitudeBin::S);
        assert_eq!(bin_traj_turns(f64::NAN), TurnBin::Zero);
    }

    #[test]
    fn bin_order_matches_wire_label_order() {
        let mut magnitudes = [
            MagnitudeBin::Xl,
            MagnitudeBin::L,
            MagnitudeBin::S,
            MagnitudeBin::M,
        ];
        magnitudes.sort();
        assert_eq!(
            magnitudes.map(|b| b.as_str()),
            ["S", "M", "L", "XL"]
        );

        let mut turns = [TurnBin::ThreePlus, TurnBin::Zero, TurnBin::Two, TurnBin::One];
        turns.sort();
        assert_eq!(turns.map(|b| b.as_str()), ["0", "1", "2", "3+"]);
    }
}
