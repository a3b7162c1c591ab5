//! The per-company pipeline and batch runner.
//!
//! One company's run is an independent computation over its own input
//! files: build the five statement tables, outer-join them into the company
//! dataset, derive the factor and valuation tables, and persist their inner
//! join as the model table. The batch runner executes each company in turn
//! and records per-company failures without aborting the batch, so one bad
//! input file never costs the other companies their outputs.

use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use equilibrium_core::frame::{inner_join_on_period, outer_join_on_period, sort_period_descending};
use equilibrium_core::{Company, Result, StatementKind};
use equilibrium_factors::{factor_table, valuation_table};
use equilibrium_statements::{extract, merge, process};
use equilibrium_treasury::treasury_series;

use crate::config::{CompanyConfig, RunConfig};
use crate::io::write_table;
use crate::source::{CsvTreasury, CsvWorkbook, TreasurySource, WorkbookSource};

/// File name of the per-company model output.
pub const MODEL_FILE: &str = "model.csv";

/// File name of the persisted treasury series, written under the data
/// directory.
pub const TREASURY_FILE: &str = "t_bill_data.csv";

/// Builds one canonical statement table from a sequence of workbook
/// sources: extract per workbook, merge, process.
///
/// Sources must be listed highest-priority first; the merger keeps the
/// first-listed row for overlapping periods.
///
/// # Errors
///
/// Returns the first extraction, merge or processing error.
pub fn statement_table<S: WorkbookSource>(sources: &[S], kind: StatementKind) -> Result<DataFrame> {
    let extracts = sources
        .iter()
        .map(|source| extract(&source.sheet(kind)?, kind))
        .collect::<Result<Vec<_>>>()?;
    let merged = merge(extracts)?;
    let table = process(kind, merged)?;
    debug!(
        sheet = kind.sheet_name(),
        rows = table.height(),
        "built statement table"
    );
    Ok(table)
}

/// The batch pipeline over a run configuration.
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    /// Creates a pipeline for `config`.
    #[must_use]
    pub const fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs every configured company, isolating per-company failures.
    ///
    /// # Errors
    ///
    /// Returns an error only if the treasury series itself cannot be
    /// built; every company needs it, so there is nothing to salvage.
    pub fn run(&self) -> Result<BatchReport> {
        let treasury = self.load_treasury()?;
        let mut runs = Vec::with_capacity(self.config.companies.len());
        for company in &self.config.companies {
            let result = self.run_company(company, &treasury);
            match &result {
                Ok(model) => info!(
                    company = %company.name,
                    periods = model.height(),
                    "company model built"
                ),
                Err(error) => warn!(
                    company = %company.name,
                    %error,
                    "company pipeline failed; continuing with remaining companies"
                ),
            }
            runs.push(CompanyRun {
                company: company.name.clone(),
                result,
            });
        }
        Ok(BatchReport { runs })
    }

    /// Runs one company from its configured workbook exports.
    ///
    /// # Errors
    ///
    /// Returns the first error of the company's pipeline; other companies'
    /// outputs are unaffected.
    pub fn run_company(&self, company: &CompanyConfig, treasury: &DataFrame) -> Result<DataFrame> {
        let dir = self.config.company_dir(&company.name);
        let sources: Vec<CsvWorkbook> = company
            .workbooks
            .iter()
            .map(|workbook| CsvWorkbook::new(dir.join(workbook)))
            .collect();
        self.run_company_from_sources(&company.name, &sources, treasury)
    }

    /// Runs one company's pipeline over arbitrary workbook sources.
    ///
    /// Writes the five canonical statement CSVs and the model CSV into the
    /// company's directory and returns the model table.
    ///
    /// # Errors
    ///
    /// Returns the first extraction, merge, processing, derivation or I/O
    /// error.
    pub fn run_company_from_sources<S: WorkbookSource>(
        &self,
        name: &Company,
        sources: &[S],
        treasury: &DataFrame,
    ) -> Result<DataFrame> {
        info!(company = %name, workbooks = sources.len(), "running company pipeline");
        let dir = self.config.company_dir(name);

        let mut dataset: Option<DataFrame> = None;
        for kind in StatementKind::ALL {
            let table = statement_table(sources, kind)?;
            let mut out = table.clone();
            write_table(&mut out, dir.join(kind.output_file()), &self.config.output)?;
            dataset = Some(match dataset {
                None => table,
                Some(acc) => outer_join_on_period(&acc, &table)?,
            });
        }
        // StatementKind::ALL is non-empty; the fallback is unreachable.
        let dataset = dataset.unwrap_or_default();
        debug!(company = %name, periods = dataset.height(), "company dataset joined");

        let factors = factor_table(&dataset, treasury)?;
        let valuation = valuation_table(&dataset)?;
        let model = inner_join_on_period(&factors, &valuation, "factor table", "valuation table")?;
        let mut model = sort_period_descending(model)?;
        write_table(&mut model, dir.join(MODEL_FILE), &self.config.output)?;
        Ok(model)
    }

    /// Builds the treasury series shared by every company in the run and
    /// persists it under the data directory as an inspectable
    /// intermediate.
    ///
    /// # Errors
    ///
    /// Returns an error if either export is unreadable, the series cannot
    /// be joined, or the persisted copy cannot be written.
    pub fn load_treasury(&self) -> Result<DataFrame> {
        let source = CsvTreasury::new(
            self.config.data_dir.join(&self.config.treasury.three_month),
            self.config.data_dir.join(&self.config.treasury.ten_year),
        );
        let (three_month, ten_year) = source.rates()?;
        let mut series = treasury_series(&three_month, &ten_year)?;
        write_table(
            &mut series,
            self.config.data_dir.join(TREASURY_FILE),
            &self.config.output,
        )?;
        Ok(series)
    }
}

/// Outcome of one company's run.
#[derive(Debug)]
pub struct CompanyRun {
    /// The company processed.
    pub company: Company,
    /// The model table, or the error that stopped this company.
    pub result: Result<DataFrame>,
}

/// Per-company outcomes of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    runs: Vec<CompanyRun>,
}

impl BatchReport {
    /// All per-company outcomes, in run order.
    #[must_use]
    pub fn runs(&self) -> &[CompanyRun] {
        &self.runs
    }

    /// Companies whose pipeline failed, with their errors.
    pub fn failed(&self) -> impl Iterator<Item = &CompanyRun> {
        self.runs.iter().filter(|run| run.result.is_err())
    }

    /// Returns true when every company produced a model.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.runs.iter().all(|run| run.result.is_ok())
    }
}
