//! Config and history CLI commands

use clap::{Args, ValueEnum};

use crate::audit::{AuditLogger, EntityType};
use crate::config::{Settings, SpendboardPaths};
use crate::display::Theme;
use crate::error::{SpendboardError, SpendboardResult};
use crate::reports::CategoryAttribution;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AttributionArg {
    FanOut,
    EvenSplit,
    FirstOnly,
}

impl From<AttributionArg> for CategoryAttribution {
    fn from(arg: AttributionArg) -> Self {
        match arg {
            AttributionArg::FanOut => CategoryAttribution::FanOut,
            AttributionArg::EvenSplit => CategoryAttribution::EvenSplit,
            AttributionArg::FirstOnly => CategoryAttribution::FirstOnly,
        }
    }
}

/// Options for `config`; with no flags the current configuration is shown
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Currency symbol for amounts
    #[arg(long)]
    pub currency: Option<String>,

    /// Colour theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// First day of the week (0 = Sunday ... 6 = Saturday)
    #[arg(long)]
    pub week_start: Option<u8>,

    /// How multi-category expenses count per category
    #[arg(long, value_enum)]
    pub attribution: Option<AttributionArg>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.currency.is_none()
            && self.theme.is_none()
            && self.week_start.is_none()
            && self.attribution.is_none()
    }
}

/// Show or update settings
pub fn handle_config_command(
    paths: &SpendboardPaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> SpendboardResult<()> {
    if !args.is_empty() {
        if let Some(day) = args.week_start {
            if day > 6 {
                return Err(SpendboardError::Validation(format!(
                    "Week start must be between 0 and 6 (got {})",
                    day
                )));
            }
            settings.first_day_of_week = day;
        }
        if let Some(currency) = args.currency {
            settings.currency_symbol = currency;
        }
        if let Some(theme) = args.theme {
            settings.theme = theme.into();
        }
        if let Some(attribution) = args.attribution {
            settings.category_attribution = attribution.into();
        }
        settings.save(paths)?;
        println!("Settings saved.");
        println!();
    }

    println!("Spendboard Configuration");
    println!("========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Week starts on:   {:?}", settings.week_start());
    println!("  Theme:            {}", settings.theme);
    println!("  Multi-category:   {}", settings.category_attribution.label());

    Ok(())
}

/// Which records `history` shows
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HistoryScope {
    Expenses,
    Budget,
}

impl From<HistoryScope> for EntityType {
    fn from(scope: HistoryScope) -> Self {
        match scope {
            HistoryScope::Expenses => EntityType::Expense,
            HistoryScope::Budget => EntityType::Budget,
        }
    }
}

/// Print the most recent audit entries
pub fn handle_history_command(
    paths: &SpendboardPaths,
    count: usize,
    only: Option<HistoryScope>,
) -> SpendboardResult<()> {
    let history = AuditLogger::new(paths.audit_log()).history()?;
    let entries = history.recent(count, only.map(EntityType::from));

    if entries.is_empty() {
        println!("No history yet.");
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    if history.skipped > 0 {
        println!("({} unreadable audit lines skipped)", history.skipped);
    }

    Ok(())
}
