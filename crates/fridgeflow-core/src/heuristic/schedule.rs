//! Time-budget allocation and the fixed six-step schedule.

use crate::model::Step;

/// Shortest budget the schedule is laid out for, in minutes.
pub const MIN_TIME_LIMIT_MIN: i64 = 15;
/// Longest budget the schedule is laid out for, in minutes.
pub const MAX_TIME_LIMIT_MIN: i64 = 90;

const HEAT_MIN_SEC: u32 = 120;
const PREP_MIN_SEC: u32 = 240;
const COOK1_MIN_SEC: u32 = 300;
const COOK2_MIN_SEC: u32 = 180;
const FINISH_MIN_SEC: u32 = 120;
/// The parallel task starts this long after the pan is hot.
const PARALLEL_LAG_SEC: u32 = 120;
const SERVE_SEC: u32 = 60;

pub const LABEL_HEAT: &str = "Preheat pan / oven / boil water";
pub const LABEL_PREP: &str = "Wash & prep (chop veg, whisk eggs, measure)";
pub const LABEL_COOK1: &str = "Start main cook (protein in pan / pasta water / sauté base)";
pub const LABEL_COOK2: &str = "Parallel task (warm starch / toss salad / set table)";
pub const LABEL_FINISH: &str = "Finish & assemble (taste, season, garnish)";
pub const LABEL_SERVE: &str = "Serve";

/// Clamp a requested time limit into the supported range.
pub fn clamp_minutes(time_limit_minutes: i64) -> i64 {
    time_limit_minutes.clamp(MIN_TIME_LIMIT_MIN, MAX_TIME_LIMIT_MIN)
}

/// Durations, in seconds, of the five working blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    pub total: u32,
    pub heat: u32,
    pub prep: u32,
    pub cook1: u32,
    pub cook2: u32,
    pub finish: u32,
}

impl TimeBudget {
    /// Partition a (clamped) time limit into blocks.
    ///
    /// Each block gets a fixed share of the total with a floor, so short
    /// budgets still yield usable durations. `finish` takes what is left
    /// and is floored too; it may exceed its nominal share when the floors
    /// push earlier blocks up.
    pub fn allocate(time_limit_minutes: i64) -> Self {
        // Clamped to [15, 90], so the product always fits.
        let total = (clamp_minutes(time_limit_minutes) * 60) as u32;

        let heat = share(total, 10).max(HEAT_MIN_SEC);
        let prep = share(total, 30).max(PREP_MIN_SEC);
        let cook1 = share(total, 35).max(COOK1_MIN_SEC);
        let cook2 = share(total, 20).max(COOK2_MIN_SEC);

        let remainder = i64::from(total) - i64::from(heat + prep + cook1 + cook2);
        let finish = u32::try_from(remainder).unwrap_or(0).max(FINISH_MIN_SEC);

        Self {
            total,
            heat,
            prep,
            cook1,
            cook2,
            finish,
        }
    }

    /// Lay the blocks out as the six fixed steps.
    pub fn steps(&self) -> Vec<Step> {
        vec![
            Step::new(LABEL_HEAT, 0, self.heat),
            Step::new(LABEL_PREP, 0, self.prep),
            Step::new(LABEL_COOK1, self.heat, self.cook1),
            Step::new(LABEL_COOK2, self.heat + PARALLEL_LAG_SEC, self.cook2),
            Step::new(LABEL_FINISH, self.heat + self.cook1, self.finish),
            Step::new(LABEL_SERVE, self.total.saturating_sub(SERVE_SEC), SERVE_SEC),
        ]
    }
}

/// Floor of `pct` percent of `total`.
fn share(total: u32, pct: u32) -> u32 {
    total * pct / 100
}
