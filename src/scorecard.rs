//! Scorecard: 13 category slots plus 4 aggregate rows.
//!
//! Each slot is `None` until filled. Category slots are written once through
//! [`Scorecard::record`]; the aggregate rows are settled by
//! [`Scorecard::settle_upper`] and [`Scorecard::settle_totals`] when their
//! section is complete. [`Scorecard::slots`] renders the flat 17-slot layout
//! with −1 for unfilled rows.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GameError;
use crate::game_mechanics::upper_bonus;
use crate::types::Category;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    categories: [Option<u16>; CATEGORY_COUNT],
    upper_subtotal: Option<u16>,
    upper_bonus: Option<u16>,
    lower_subtotal: Option<u16>,
    grand_total: Option<u16>,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn get(&self, category: Category) -> Option<u16> {
        self.categories[category.index()]
    }

    #[inline(always)]
    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Write `points` into an unfilled category slot.
    pub fn record(&mut self, category: Category, points: u16) -> Result<(), GameError> {
        let slot = &mut self.categories[category.index()];
        if slot.is_some() {
            return Err(GameError::CategoryAlreadyFilled(category));
        }
        *slot = Some(points);
        Ok(())
    }

    pub fn upper_complete(&self) -> bool {
        Category::UPPER.iter().all(|&c| self.is_filled(c))
    }

    pub fn is_complete(&self) -> bool {
        self.categories.iter().all(Option::is_some)
    }

    /// Categories still open, in scorecard order.
    pub fn open_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|&c| !self.is_filled(c))
            .collect()
    }

    /// Fill UpperSubtotal and UpperBonus once all six upper slots are scored.
    /// Returns whether the rows are set.
    pub fn settle_upper(&mut self) -> bool {
        if !self.upper_complete() {
            return false;
        }
        let subtotal = section_sum(&self.categories, &Category::UPPER);
        self.upper_subtotal = Some(subtotal);
        self.upper_bonus = Some(upper_bonus(subtotal));
        true
    }

    /// Fill LowerSubtotal and GrandTotal once every category is scored.
    /// Returns the grand total when the card is complete.
    pub fn settle_totals(&mut self) -> Option<u16> {
        if !self.is_complete() || !self.settle_upper() {
            return None;
        }
        let lower = section_sum(&self.categories, &Category::LOWER);
        let total = self.upper_subtotal.unwrap_or(0) + self.upper_bonus.unwrap_or(0) + lower;
        self.lower_subtotal = Some(lower);
        self.grand_total = Some(total);
        Some(total)
    }

    pub fn upper_subtotal(&self) -> Option<u16> {
        self.upper_subtotal
    }

    pub fn upper_bonus(&self) -> Option<u16> {
        self.upper_bonus
    }

    pub fn lower_subtotal(&self) -> Option<u16> {
        self.lower_subtotal
    }

    pub fn grand_total(&self) -> Option<u16> {
        self.grand_total
    }

    /// Flat 17-slot view: categories at their slot indices, aggregates at
    /// 6, 7, 15 and 16, unfilled rows as −1.
    pub fn slots(&self) -> [i32; SCORECARD_SLOTS] {
        let render = |v: Option<u16>| v.map_or(UNFILLED_SLOT, i32::from);
        let mut out = [UNFILLED_SLOT; SCORECARD_SLOTS];
        for cat in Category::ALL {
            out[cat.slot_index()] = render(self.get(cat));
        }
        out[SLOT_UPPER_SUBTOTAL] = render(self.upper_subtotal);
        out[SLOT_UPPER_BONUS] = render(self.upper_bonus);
        out[SLOT_LOWER_SUBTOTAL] = render(self.lower_subtotal);
        out[SLOT_GRAND_TOTAL] = render(self.grand_total);
        out
    }
}

fn section_sum(categories: &[Option<u16>; CATEGORY_COUNT], section: &[Category]) -> u16 {
    section
        .iter()
        .filter_map(|c| categories[c.index()])
        .sum()
}
