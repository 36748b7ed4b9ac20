use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use super::Direction;
use super::TieBreaker;

/// A tie breaker which selects the variable with the "best" value (according to the
/// [`Direction`]); if there is a tie then any of the tied variables is selected with equal
/// probability.
///
/// When a variable with the same value as the selected one is considered, it replaces the selected
/// one with probability `1 / n`, where `n` is the number of variables seen with that value.
#[derive(Debug, Clone)]
pub(crate) struct RandomTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    /// The number of variables with the value of the selected variable.
    num_variables_considered: u32,
    direction: Direction,
    rng: SmallRng,
}

impl<Var, Value> RandomTieBreaker<Var, Value> {
    pub(crate) fn new(direction: Direction, seed: u64) -> Self {
        RandomTieBreaker {
            selected: None,
            num_variables_considered: 0,
            direction,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<Var, Value: PartialOrd> TieBreaker<Var, Value> for RandomTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        let Some((_, selected_value)) = self.selected.as_ref() else {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
            return;
        };

        if self.direction.improves(&value, selected_value) {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
        } else if value == *selected_value {
            self.num_variables_considered += 1;
            if self
                .rng
                .gen_bool(1.0 / f64::from(self.num_variables_considered))
            {
                self.selected = Some((variable, value));
            }
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.num_variables_considered = 0;
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}
