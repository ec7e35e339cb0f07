/// Two-state long/flat position machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Long,
}

impl PositionState {
    /// Advance one bar.
    ///
    /// From `Flat` only the buy rule is consulted, from `Long` only the exit
    /// rule, so a bar where both fire enters when flat and exits when long.
    pub fn step(self, buy: bool, exit: bool) -> Self {
        match self {
            PositionState::Flat if buy => PositionState::Long,
            PositionState::Flat => PositionState::Flat,
            PositionState::Long if exit => PositionState::Flat,
            PositionState::Long => PositionState::Long,
        }
    }

    pub fn as_position(self) -> i32 {
        match self {
            PositionState::Flat => 0,
            PositionState::Long => 1,
        }
    }
}

/// Run the state machine over the rule flags in bar order.
///
/// The result is the position decided at the close of each bar, before the
/// one-bar execution delay.
pub fn raw_positions(buy: &[bool], exit: &[bool]) -> Vec<i32> {
    let mut state = PositionState::Flat;
    buy.iter()
        .zip(exit)
        .map(|(&b, &e)| {
            state = state.step(b, e);
            state.as_position()
        })
        .collect()
}

/// Delay decisions by one bar: `out[i] = raw[i - 1]`, `out[0] = 0`.
pub fn shift_forward(raw: &[i32]) -> Vec<i32> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(raw.len());
    out.push(0);
    out.extend_from_slice(&raw[..raw.len() - 1]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_transitions() {
        use PositionState::*;
        assert_eq!(Flat.step(false, false), Flat);
        assert_eq!(Flat.step(true, false), Long);
        assert_eq!(Flat.step(false, true), Flat);
        assert_eq!(Long.step(false, false), Long);
        assert_eq!(Long.step(true, false), Long);
        assert_eq!(Long.step(false, true), Flat);
    }

    #[test]
    fn test_tie_break() {
        // both rules true: enter from flat, exit from long
        assert_eq!(PositionState::Flat.step(true, true), PositionState::Long);
        assert_eq!(PositionState::Long.step(true, true), PositionState::Flat);
    }

    #[test]
    fn test_raw_positions() {
        let buy = [false, true, false, false, true, false];
        let exit = [true, false, false, true, true, true];
        // bar 4: both fire while flat -> enter; bar 5: exit
        assert_eq!(raw_positions(&buy, &exit), vec![0, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_shift_forward() {
        assert_eq!(shift_forward(&[1, 1, 0, 1]), vec![0, 1, 1, 0]);
        assert_eq!(shift_forward(&[1]), vec![0]);
        assert!(shift_forward(&[]).is_empty());
    }
}
