//! Collaborator interfaces for activity the engine reads but never owns.
//!
//! Bookings, point-of-sale transactions, operating revenue/expense
//! figures, and the staff directory live in other subsystems. The engine
//! consumes them through the traits below; [`InMemoryActivityLedger`]
//! implements all of them for tests and the bundled API state.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Booking, DateRange, PnlFigures, Sale};

/// A barber as reported by the staff directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarberProfile {
    /// Unique barber ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The branch the barber works at.
    pub branch_id: String,
}

/// Source of completed, paid service bookings.
pub trait BookingLedger: Send + Sync {
    /// Returns the barber's completed, paid bookings within the range.
    fn completed_paid_bookings(&self, barber_id: &str, range: &DateRange) -> Vec<Booking>;
}

/// Source of completed point-of-sale transactions.
pub trait SalesLedger: Send + Sync {
    /// Returns the barber's completed sales within the range.
    fn completed_sales(&self, barber_id: &str, range: &DateRange) -> Vec<Sale>;
}

/// Source of branch revenue, expense, and inventory figures.
pub trait OperatingLedger: Send + Sync {
    /// Cumulative revenue and expenses from inception through `as_of`.
    fn cumulative_figures(&self, branch_id: &str, as_of: NaiveDate) -> PnlFigures;

    /// Revenue and expenses within a date range.
    fn figures_in_range(&self, branch_id: &str, range: &DateRange) -> PnlFigures;

    /// Current inventory value for the branch.
    fn inventory_value(&self, branch_id: &str) -> Decimal;
}

/// Source of barber rosters.
pub trait StaffDirectory: Send + Sync {
    /// Returns the active barbers at a branch.
    fn active_barbers(&self, branch_id: &str) -> Vec<BarberProfile>;

    /// Looks up a barber's display name.
    fn barber_name(&self, barber_id: &str) -> Option<String>;
}

/// Everything the engine reads from the outside, as one bound.
pub trait ActivityFeeds: BookingLedger + SalesLedger + OperatingLedger + StaffDirectory {}

impl<T: BookingLedger + SalesLedger + OperatingLedger + StaffDirectory> ActivityFeeds for T {}

impl<T: BookingLedger + ?Sized> BookingLedger for std::sync::Arc<T> {
    fn completed_paid_bookings(&self, barber_id: &str, range: &DateRange) -> Vec<Booking> {
        (**self).completed_paid_bookings(barber_id, range)
    }
}

impl<T: SalesLedger + ?Sized> SalesLedger for std::sync::Arc<T> {
    fn completed_sales(&self, barber_id: &str, range: &DateRange) -> Vec<Sale> {
        (**self).completed_sales(barber_id, range)
    }
}

impl<T: OperatingLedger + ?Sized> OperatingLedger for std::sync::Arc<T> {
    fn cumulative_figures(&self, branch_id: &str, as_of: NaiveDate) -> PnlFigures {
        (**self).cumulative_figures(branch_id, as_of)
    }

    fn figures_in_range(&self, branch_id: &str, range: &DateRange) -> PnlFigures {
        (**self).figures_in_range(branch_id, range)
    }

    fn inventory_value(&self, branch_id: &str) -> Decimal {
        (**self).inventory_value(branch_id)
    }
}

impl<T: StaffDirectory + ?Sized> StaffDirectory for std::sync::Arc<T> {
    fn active_barbers(&self, branch_id: &str) -> Vec<BarberProfile> {
        (**self).active_barbers(branch_id)
    }

    fn barber_name(&self, barber_id: &str) -> Option<String> {
        (**self).barber_name(barber_id)
    }
}

/// An in-memory implementation of every collaborator trait.
///
/// Seeded explicitly by callers; used by the API state and throughout the
/// test suite.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLedger {
    bookings: Vec<Booking>,
    sales: Vec<Sale>,
    revenues: Vec<(String, NaiveDate, Decimal)>,
    expenses: Vec<(String, NaiveDate, Decimal)>,
    inventory: HashMap<String, Decimal>,
    barbers: Vec<BarberProfile>,
}

impl InMemoryActivityLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a completed, paid booking.
    pub fn add_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Seeds a completed sale.
    pub fn add_sale(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    /// Seeds a dated revenue amount for a branch.
    pub fn add_revenue(&mut self, branch_id: &str, date: NaiveDate, amount: Decimal) {
        self.revenues.push((branch_id.to_string(), date, amount));
    }

    /// Seeds a dated expense amount for a branch.
    pub fn add_expense(&mut self, branch_id: &str, date: NaiveDate, amount: Decimal) {
        self.expenses.push((branch_id.to_string(), date, amount));
    }

    /// Sets the current inventory value for a branch.
    pub fn set_inventory_value(&mut self, branch_id: &str, value: Decimal) {
        self.inventory.insert(branch_id.to_string(), value);
    }

    /// Seeds an active barber.
    pub fn add_barber(&mut self, id: &str, name: &str, branch_id: &str) {
        self.barbers.push(BarberProfile {
            id: id.to_string(),
            name: name.to_string(),
            branch_id: branch_id.to_string(),
        });
    }
}

impl BookingLedger for InMemoryActivityLedger {
    fn completed_paid_bookings(&self, barber_id: &str, range: &DateRange) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.barber_id == barber_id && range.contains(b.date))
            .cloned()
            .collect()
    }
}

impl SalesLedger for InMemoryActivityLedger {
    fn completed_sales(&self, barber_id: &str, range: &DateRange) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| s.barber_id == barber_id && range.contains(s.date))
            .cloned()
            .collect()
    }
}

impl OperatingLedger for InMemoryActivityLedger {
    fn cumulative_figures(&self, branch_id: &str, as_of: NaiveDate) -> PnlFigures {
        let revenue = self
            .revenues
            .iter()
            .filter(|(b, d, _)| b == branch_id && *d <= as_of)
            .map(|(_, _, a)| *a)
            .sum();
        let expenses = self
            .expenses
            .iter()
            .filter(|(b, d, _)| b == branch_id && *d <= as_of)
            .map(|(_, _, a)| *a)
            .sum();
        PnlFigures { revenue, expenses }
    }

    fn figures_in_range(&self, branch_id: &str, range: &DateRange) -> PnlFigures {
        let revenue = self
            .revenues
            .iter()
            .filter(|(b, d, _)| b == branch_id && range.contains(*d))
            .map(|(_, _, a)| *a)
            .sum();
        let expenses = self
            .expenses
            .iter()
            .filter(|(b, d, _)| b == branch_id && range.contains(*d))
            .map(|(_, _, a)| *a)
            .sum();
        PnlFigures { revenue, expenses }
    }

    fn inventory_value(&self, branch_id: &str) -> Decimal {
        self.inventory
            .get(branch_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl StaffDirectory for InMemoryActivityLedger {
    fn active_barbers(&self, branch_id: &str) -> Vec<BarberProfile> {
        self.barbers
            .iter()
            .filter(|b| b.branch_id == branch_id)
            .cloned()
            .collect()
    }

    fn barber_name(&self, barber_id: &str) -> Option<String> {
        self.barbers
            .iter()
            .find(|b| b.id == barber_id)
            .map(|b| b.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn seeded_ledger() -> InMemoryActivityLedger {
        let mut ledger = InMemoryActivityLedger::new();
        ledger.add_barber("barber_a", "Alex Cruz", "branch_1");
        ledger.add_barber("barber_b", "Ben Reyes", "branch_1");
        ledger.add_barber("barber_c", "Carlo Tan", "branch_2");
        ledger.add_booking(Booking {
            id: "b1".to_string(),
            barber_id: "barber_a".to_string(),
            branch_id: "branch_1".to_string(),
            service_id: "haircut".to_string(),
            date: date(5),
            price: dec("500"),
        });
        ledger.add_revenue("branch_1", date(1), dec("10000"));
        ledger.add_expense("branch_1", date(2), dec("4000"));
        ledger.add_revenue("branch_1", date(20), dec("3000"));
        ledger
    }

    #[test]
    fn test_bookings_filtered_by_barber_and_range() {
        let ledger = seeded_ledger();
        let range = DateRange::new(date(1), date(10)).unwrap();

        assert_eq!(ledger.completed_paid_bookings("barber_a", &range).len(), 1);
        assert_eq!(ledger.completed_paid_bookings("barber_b", &range).len(), 0);

        let early = DateRange::new(date(1), date(4)).unwrap();
        assert_eq!(ledger.completed_paid_bookings("barber_a", &early).len(), 0);
    }

    #[test]
    fn test_cumulative_figures_respect_as_of() {
        let ledger = seeded_ledger();

        let figures = ledger.cumulative_figures("branch_1", date(10));
        assert_eq!(figures.revenue, dec("10000"));
        assert_eq!(figures.expenses, dec("4000"));
        assert_eq!(figures.net(), dec("6000"));

        let later = ledger.cumulative_figures("branch_1", date(25));
        assert_eq!(later.revenue, dec("13000"));
    }

    #[test]
    fn test_figures_in_range() {
        let ledger = seeded_ledger();
        let range = DateRange::new(date(15), date(25)).unwrap();

        let figures = ledger.figures_in_range("branch_1", &range);
        assert_eq!(figures.revenue, dec("3000"));
        assert_eq!(figures.expenses, Decimal::ZERO);
    }

    #[test]
    fn test_active_barbers_scoped_to_branch() {
        let ledger = seeded_ledger();
        assert_eq!(ledger.active_barbers("branch_1").len(), 2);
        assert_eq!(ledger.active_barbers("branch_2").len(), 1);
        assert_eq!(ledger.barber_name("barber_b"), Some("Ben Reyes".to_string()));
        assert_eq!(ledger.barber_name("missing"), None);
    }

    #[test]
    fn test_inventory_defaults_to_zero() {
        let ledger = seeded_ledger();
        assert_eq!(ledger.inventory_value("branch_1"), Decimal::ZERO);
    }
}
