//! Quantity rule resolution.

use crate::domain::bom::QuantityRule;

impl QuantityRule {
    /// Turn a declarative rule into a concrete quantity for the given
    /// feeder/motor counts. A zero input count legitimately yields a
    /// zero-quantity result; the expander keeps such lines so consumers
    /// see the full rule set exercised.
    pub fn resolve(self, base_quantity: u32, feeder_count: u32, motor_count: u32) -> u32 {
        match self {
            QuantityRule::Fixed => base_quantity,
            QuantityRule::PerFeeder => feeder_count * base_quantity,
            QuantityRule::PerMotor => motor_count * base_quantity,
            QuantityRule::PerCapacitorBank => feeder_count.div_ceil(2) * base_quantity,
        }
    }
}
