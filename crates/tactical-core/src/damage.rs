/// Capability contract for anything that can be attacked.
///
/// A handle to a damageable entity held by a group is assumed alive until
/// checked; dead entries are lazily pruned wherever they are iterated.
pub trait Damageable {
    /// Take damage by the specified amount.
    fn damage(&mut self, amount: f32);

    /// Is the object currently alive?
    fn is_alive(&self) -> bool;
}

/// Reference hit-point implementation of [`Damageable`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    pub fn kill(&mut self) {
        self.current = 0.0;
    }
}

impl Damageable for Health {
    fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}
