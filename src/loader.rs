use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::errors::Error;

pub const SUBJECT: &str = "SUBJECT";
pub const ROUND: &str = "ROUND";
pub const SURVEY_DAY: &str = "SURVEY_DAY";
pub const CONSUMPTION_TIME_HOUR: &str = "CONSUMPTION_TIME_HOUR";
pub const FOODEX2_INGR_DESCR: &str = "FOODEX2_INGR_DESCR";

/// The columns the pipeline needs. Anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    SUBJECT,
    ROUND,
    SURVEY_DAY,
    CONSUMPTION_TIME_HOUR,
    FOODEX2_INGR_DESCR,
];

/// One survey row, restricted to the transaction-key fields and the
/// ingredient description. The ingredient is whitespace-trimmed on load;
/// key fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRecord {
    pub subject: String,
    pub round: String,
    pub survey_day: String,
    pub time_hour: String,
    pub ingredient: String,
}

pub fn load_records(path: &Path) -> Result<Vec<SurveyRecord>, Error> {
    info!(path = %path.display(), "loading survey data");
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(BufReader::new(file))?;
    info!(records = records.len(), "survey data loaded");
    Ok(records)
}

fn read_records<R: Read>(input: R) -> Result<Vec<SurveyRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, Error> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(Error::Schema { column: name })
    };
    let subject = column(SUBJECT)?;
    let round = column(ROUND)?;
    let survey_day = column(SURVEY_DAY)?;
    let time_hour = column(CONSUMPTION_TIME_HOUR)?;
    let ingredient = column(FOODEX2_INGR_DESCR)?;

    let mut records = vec![];
    for row in reader.records() {
        let row = row?;
        let field = |index: usize| row.get(index).unwrap_or("").to_string();
        records.push(SurveyRecord {
            subject: field(subject),
            round: field(round),
            survey_day: field(survey_day),
            time_hour: field(time_hour),
            ingredient: row.get(ingredient).unwrap_or("").trim().to_string(),
        });
    }
    Ok(records)
}
