use pizzeria_core::DomainError;

/// Pizza size; scales every base portion quantity of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PizzaSize {
    Small,
    Medium,
    Big,
}

impl PizzaSize {
    pub const ALL: [PizzaSize; 3] = [PizzaSize::Small, PizzaSize::Medium, PizzaSize::Big];

    /// Parse a wire code (`S`, `M`, `B`).
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        match code.trim() {
            "S" => Ok(PizzaSize::Small),
            "M" => Ok(PizzaSize::Medium),
            "B" => Ok(PizzaSize::Big),
            other => Err(DomainError::invalid_size(format!(
                "{other:?} (expected one of: S, M, B)"
            ))),
        }
    }

    pub fn code(self) -> char {
        match self {
            PizzaSize::Small => 'S',
            PizzaSize::Medium => 'M',
            PizzaSize::Big => 'B',
        }
    }

    pub fn multiplier(self) -> i64 {
        match self {
            PizzaSize::Small => 1,
            PizzaSize::Medium => 2,
            PizzaSize::Big => 3,
        }
    }

    /// Base portions scaled to this size.
    pub fn scale(self, base_portions: u32) -> i64 {
        i64::from(base_portions) * self.multiplier()
    }
}
