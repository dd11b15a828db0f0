//! Expense store
//!
//! Owns the in-memory snapshot of expenses and the current budget, sourced
//! from the injected providers. Every mutation goes through the provider
//! first; the snapshot only changes once the provider has accepted it.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{SpendboardError, SpendboardResult};
use crate::models::{Budget, Category, Expense, ExpenseId, Money, NewExpense};
use crate::reports::{AggregationOptions, Aggregator, DashboardSummary};
use crate::services::ExpenseFilter;
use crate::storage::{BudgetProvider, ExpenseProvider};

/// Snapshot of expenses and budget plus the providers behind them
pub struct ExpenseStore {
    expense_provider: Box<dyn ExpenseProvider>,
    budget_provider: Box<dyn BudgetProvider>,
    audit: Option<AuditLogger>,
    expenses: Vec<Expense>,
    budget: Budget,
}

impl ExpenseStore {
    /// Create a store with an empty snapshot. Call [`refresh`](Self::refresh)
    /// to load from the providers.
    pub fn new(
        expense_provider: Box<dyn ExpenseProvider>,
        budget_provider: Box<dyn BudgetProvider>,
    ) -> Self {
        Self {
            expense_provider,
            budget_provider,
            audit: None,
            expenses: Vec::new(),
            budget: Budget::starter(),
        }
    }

    /// Record mutations in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Audit entries about one expense, oldest first; empty without an audit log
    pub fn history_of(&self, expense: &Expense) -> SpendboardResult<Vec<AuditEntry>> {
        let Some(audit) = &self.audit else {
            return Ok(Vec::new());
        };
        let history = audit.history()?;
        Ok(history
            .for_expense(&expense.id.to_string())
            .into_iter()
            .cloned()
            .collect())
    }

    /// Create and load in one step
    pub fn open(
        expense_provider: Box<dyn ExpenseProvider>,
        budget_provider: Box<dyn BudgetProvider>,
    ) -> SpendboardResult<Self> {
        let mut store = Self::new(expense_provider, budget_provider);
        store.refresh()?;
        Ok(store)
    }

    /// Reload the snapshot. On failure the previous snapshot stays in place.
    ///
    /// Stored expenses that break the submission rules are left out of the
    /// snapshot; a stored budget with negative limits fails the refresh.
    pub fn refresh(&mut self) -> SpendboardResult<()> {
        let loaded = self.expense_provider.list_expenses().map_err(|e| {
            warn!(error = %e, "failed to load expenses, keeping previous snapshot");
            e
        })?;
        let budget = self.budget_provider.get_budgets().map_err(|e| {
            warn!(error = %e, "failed to load budget, keeping previous snapshot");
            e
        })?;

        budget.validate().map_err(|e| {
            warn!(error = %e, "stored budget is invalid, keeping previous snapshot");
            SpendboardError::Validation(e.to_string())
        })?;

        let total = loaded.len();
        let expenses: Vec<Expense> = loaded
            .into_iter()
            .filter(|expense| match expense.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(id = %expense.id, error = %e, "skipping invalid stored expense");
                    false
                }
            })
            .collect();

        debug!(
            count = expenses.len(),
            skipped = total - expenses.len(),
            "refreshed expense snapshot"
        );
        self.expenses = expenses;
        self.budget = budget;
        Ok(())
    }

    /// The current snapshot, in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Find an expense by full UUID or its `exp-` short form
    pub fn find(&self, reference: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id.matches(reference))
    }

    /// Sanitize, validate and store a new expense
    pub fn add(&mut self, new: NewExpense) -> SpendboardResult<Expense> {
        let new = new.sanitized();
        new.validate()
            .map_err(|e| SpendboardError::Validation(e.to_string()))?;

        let expense = self.expense_provider.add_expense(new)?;
        self.expenses.push(expense.clone());
        info!(id = %expense.id, amount = %expense.amount, "added expense");

        self.log(AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        ));

        Ok(expense)
    }

    /// Delete by ID
    pub fn delete(&mut self, id: ExpenseId) -> SpendboardResult<Expense> {
        if !self.expenses.iter().any(|e| e.id == id) {
            return Err(SpendboardError::expense_not_found(id.to_string()));
        }

        let removed = self.expense_provider.delete_expense(id)?;
        self.expenses.retain(|e| e.id != id);
        info!(id = %removed.id, "deleted expense");

        self.log(AuditEntry::delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        ));

        Ok(removed)
    }

    /// Delete by zero-based position in the snapshot
    pub fn delete_at(&mut self, index: usize) -> SpendboardResult<Expense> {
        let id = self
            .expenses
            .get(index)
            .map(|e| e.id)
            .ok_or_else(|| SpendboardError::expense_not_found(format!("#{}", index + 1)))?;
        self.delete(id)
    }

    /// Replace the budget wholesale
    pub fn set_budget(&mut self, budget: Budget) -> SpendboardResult<()> {
        budget
            .validate()
            .map_err(|e| SpendboardError::Validation(e.to_string()))?;

        self.budget_provider.set_budgets(&budget)?;
        let previous = std::mem::replace(&mut self.budget, budget);
        info!("replaced budget");

        self.log(AuditEntry::replace(
            EntityType::Budget,
            "budget",
            &previous,
            &self.budget,
            budget_changes(&previous, &self.budget),
        ));

        Ok(())
    }

    /// An aggregator over the current snapshot
    pub fn aggregator(&self, reference: NaiveDate, options: AggregationOptions) -> Aggregator<'_> {
        Aggregator::with_options(&self.expenses, reference, options)
    }

    /// Everything the dashboard shows for `reference`
    pub fn dashboard(&self, reference: NaiveDate, options: AggregationOptions) -> DashboardSummary {
        DashboardSummary::generate(&self.expenses, &self.budget, reference, options)
    }

    /// Dashboard over only the expenses `filter` keeps
    pub fn dashboard_for(
        &self,
        filter: &ExpenseFilter,
        reference: NaiveDate,
        options: AggregationOptions,
    ) -> DashboardSummary {
        if filter.is_empty() {
            return self.dashboard(reference, options);
        }
        let selected: Vec<Expense> = filter.apply(&self.expenses).into_iter().cloned().collect();
        debug!(kept = selected.len(), total = self.expenses.len(), "filtered dashboard");
        DashboardSummary::generate(&selected, &self.budget, reference, options)
    }

    // Audit failures must not undo a mutation the provider already accepted
    fn log(&self, entry: AuditEntry) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

/// Describe what differs between two budgets, `None` when nothing does
fn budget_changes(before: &Budget, after: &Budget) -> Option<String> {
    let mut changes: Vec<String> = Category::ALL
        .iter()
        .filter(|c| before.limit_for(**c) != after.limit_for(**c))
        .map(|c| format!("{}: {} -> {}", c, before.limit_for(*c), after.limit_for(*c)))
        .collect();

    if before.monthly_limit != after.monthly_limit {
        let show = |limit: Option<Money>| match limit {
            Some(amount) => amount.to_string(),
            None => "none".to_string(),
        };
        changes.push(format!(
            "monthly: {} -> {}",
            show(before.monthly_limit),
            show(after.monthly_limit)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::TimeWindow;
    use crate::storage::{MemoryBudgetProvider, MemoryExpenseProvider};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn lunch() -> NewExpense {
        NewExpense::new(date("2024-12-01"), Category::Food, "Lunch", Money::from_cents(3550))
    }

    fn memory_store() -> ExpenseStore {
        ExpenseStore::open(
            Box::new(MemoryExpenseProvider::new()),
            Box::new(MemoryBudgetProvider::default()),
        )
        .unwrap()
    }

    /// Fails every call once `failing` is set
    struct FlakyProvider {
        inner: MemoryExpenseProvider,
        failing: Arc<AtomicBool>,
    }

    impl FlakyProvider {
        fn check(&self) -> SpendboardResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                Err(SpendboardError::Provider("connection reset".into()))
            } else {
                Ok(())
            }
        }
    }

    impl ExpenseProvider for FlakyProvider {
        fn list_expenses(&self) -> SpendboardResult<Vec<Expense>> {
            self.check()?;
            self.inner.list_expenses()
        }

        fn add_expense(&self, expense: NewExpense) -> SpendboardResult<Expense> {
            self.check()?;
            self.inner.add_expense(expense)
        }

        fn delete_expense(&self, id: ExpenseId) -> SpendboardResult<Expense> {
            self.check()?;
            self.inner.delete_expense(id)
        }
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = memory_store();
        let first = store.add(lunch()).unwrap();
        let mut coffee = lunch();
        coffee.description = "Coffee".into();
        let second = store.add(coffee).unwrap();

        let ids: Vec<_> = store.expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(store.find(&first.id.to_string()).is_some());
    }

    #[test]
    fn test_add_sanitizes_then_validates() {
        let mut store = memory_store();

        let mut tagged = lunch();
        tagged.description = "<b>Lunch</b>; with 'team'".into();
        let stored = store.add(tagged).unwrap();
        assert_eq!(stored.description, "Lunch with team");

        let mut markup_only = lunch();
        markup_only.description = "<script>x</script>".into();
        let err = store.add(markup_only).unwrap_err();
        assert!(err.is_validation());

        let mut free = lunch();
        free.amount = Money::zero();
        assert!(store.add(free).unwrap_err().is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_by_id_and_index() {
        let mut store = memory_store();
        let first = store.add(lunch()).unwrap();
        let second = store.add(lunch()).unwrap();

        let removed = store.delete_at(1).unwrap();
        assert_eq!(removed.id, second.id);

        store.delete(first.id).unwrap();
        assert!(store.is_empty());

        assert!(store.delete(first.id).unwrap_err().is_not_found());
        assert!(store.delete_at(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_failed_refresh_keeps_snapshot() {
        let failing = Arc::new(AtomicBool::new(false));
        let provider = FlakyProvider {
            inner: MemoryExpenseProvider::new(),
            failing: Arc::clone(&failing),
        };
        let mut store = ExpenseStore::open(
            Box::new(provider),
            Box::new(MemoryBudgetProvider::default()),
        )
        .unwrap();
        store.add(lunch()).unwrap();

        failing.store(true, Ordering::SeqCst);
        let err = store.refresh().unwrap_err();
        assert!(err.is_provider());
        assert_eq!(store.len(), 1);

        // A rejected write leaves the snapshot alone too
        assert!(store.add(lunch()).unwrap_err().is_provider());
        assert_eq!(store.len(), 1);
    }

    fn stored(day: &str, categories: Vec<Category>, description: &str, cents: i64) -> Expense {
        let mut expense = Expense::from_new(ExpenseId::new(), lunch());
        expense.date = date(day);
        expense.categories = categories;
        expense.description = description.to_string();
        expense.amount = Money::from_cents(cents);
        expense
    }

    #[test]
    fn test_refresh_skips_invalid_stored_expenses() {
        let provider = MemoryExpenseProvider::with_expenses(vec![
            stored("2024-11-01", vec![Category::Food], "Refund", -5000),
            stored("2024-12-01", vec![], "No category", 100),
            stored("2024-12-01", vec![Category::Food], "x", 100),
            stored("2024-12-01", vec![Category::Food, Category::Food], "Twice", 100),
            stored("2024-12-01", vec![Category::Food], "Lunch", 1000),
        ]);
        let store = ExpenseStore::open(
            Box::new(provider),
            Box::new(MemoryBudgetProvider::default()),
        )
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.expenses()[0].description, "Lunch");

        let aggregator = store.aggregator(date("2024-12-01"), AggregationOptions::default());
        for window in TimeWindow::ALL {
            assert!(aggregator.total(window) <= aggregator.total(TimeWindow::AllTime));
        }
        assert_eq!(aggregator.total(TimeWindow::AllTime), Money::from_cents(1000));
    }

    #[test]
    fn test_refresh_rejects_invalid_stored_budget() {
        let budget_provider = MemoryBudgetProvider::default();
        let mut store = ExpenseStore::open(
            Box::new(MemoryExpenseProvider::new()),
            Box::new(budget_provider),
        )
        .unwrap();
        store.add(lunch()).unwrap();

        let broken = Budget::new().with_limit(Category::Food, Money::from_cents(-100));
        store.budget_provider.set_budgets(&broken).unwrap();

        let err = store.refresh().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.budget(), &Budget::starter());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_budget_validates_and_replaces() {
        let mut store = memory_store();

        let negative = Budget::new().with_limit(Category::Food, Money::from_cents(-1));
        assert!(store.set_budget(negative).unwrap_err().is_validation());
        assert_eq!(store.budget(), &Budget::starter());

        let budget = Budget::new().with_limit(Category::Food, Money::from_units(90));
        store.set_budget(budget.clone()).unwrap();
        assert_eq!(store.budget(), &budget);

        store.refresh().unwrap();
        assert_eq!(store.budget(), &budget);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = memory_store().with_audit(logger);

        let added = store.add(lunch()).unwrap();
        assert_eq!(store.history_of(&added).unwrap().len(), 1);
        store.delete(added.id).unwrap();
        store
            .set_budget(Budget::starter().with_limit(Category::Food, Money::from_units(300)))
            .unwrap();
        assert_eq!(store.history_of(&added).unwrap().len(), 2);

        let entries = AuditLogger::new(temp_dir.path().join("audit.log"))
            .history()
            .unwrap()
            .entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].entity_type, EntityType::Budget);
        assert_eq!(
            entries[2].summary.as_deref(),
            Some("Food: $250.00 -> $300.00")
        );
    }

    #[test]
    fn test_aggregates_current_snapshot() {
        let mut store = memory_store();
        store.add(lunch()).unwrap();
        store
            .add(NewExpense::new(
                date("2024-11-20"),
                Category::Shopping,
                "Shoes",
                Money::from_units(80),
            ))
            .unwrap();

        let aggregator = store.aggregator(date("2024-12-01"), AggregationOptions::default());
        assert_eq!(aggregator.total(TimeWindow::Today), Money::from_cents(3550));
        assert_eq!(aggregator.total(TimeWindow::AllTime), Money::from_cents(11550));

        let summary = store.dashboard(date("2024-12-01"), AggregationOptions::default());
        assert_eq!(summary.window(TimeWindow::ThisMonth).count, 1);
    }

    #[test]
    fn test_filtered_dashboard() {
        let mut store = memory_store();
        store.add(lunch()).unwrap();
        store
            .add(NewExpense::new(
                date("2024-12-01"),
                Category::Shopping,
                "Shoes",
                Money::from_units(80),
            ))
            .unwrap();
        let reference = date("2024-12-01");
        let options = AggregationOptions::default();

        let food = store.dashboard_for(&ExpenseFilter::new().category("Food"), reference, options);
        assert_eq!(food.window(TimeWindow::Today).total, Money::from_cents(3550));
        assert_eq!(food.window(TimeWindow::Today).count, 1);

        let shoes = store.dashboard_for(&ExpenseFilter::new().search("SHOE"), reference, options);
        assert_eq!(shoes.window(TimeWindow::AllTime).total, Money::from_units(80));

        // An empty filter is the plain dashboard
        let all = store.dashboard_for(&ExpenseFilter::new(), reference, options);
        assert_eq!(all.window(TimeWindow::AllTime).count, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_budget_changes_summary() {
        let before = Budget::starter();
        assert_eq!(budget_changes(&before, &before), None);

        let after = before.clone().with_monthly_limit(Money::from_units(1000));
        assert_eq!(
            budget_changes(&before, &after).as_deref(),
            Some("monthly: none -> $1000.00")
        );
    }
}
