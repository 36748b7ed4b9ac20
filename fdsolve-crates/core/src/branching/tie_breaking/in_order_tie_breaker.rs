use super::Direction;
use super::TieBreaker;

/// A tie-breaker which selects the first element with the best value that it has seen.
#[derive(Debug, Clone)]
pub(crate) struct InOrderTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub(crate) fn new(direction: Direction) -> Self {
        InOrderTieBreaker {
            selected: None,
            direction,
        }
    }
}

impl<Var, Value: PartialOrd> TieBreaker<Var, Value> for InOrderTieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value) {
        let is_better = self
            .selected
            .as_ref()
            .map_or(true, |(_, selected_value)| {
                self.direction.improves(&value, selected_value)
            });
        if is_better {
            self.selected = Some((variable, value));
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_minimum_is_selected() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(0, 10);
        breaker.consider(1, 5);
        breaker.consider(2, 5);

        assert_eq!(Some(1), breaker.select());
    }

    #[test]
    fn first_maximum_is_selected() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);

        breaker.consider(0, 5);
        breaker.consider(1, 10);
        breaker.consider(2, 10);

        assert_eq!(Some(1), breaker.select());
    }

    #[test]
    fn selecting_resets_the_breaker() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);
        breaker.consider(0, 1);

        assert_eq!(Some(0), breaker.select());
        assert_eq!(None, breaker.select());
    }
}
