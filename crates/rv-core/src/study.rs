//! Two-stage study data.
//!
//! `StudyData` holds the primary-study p-values of the features selected for
//! follow-up (`p1`), the follow-up p-values of the same features (`p2`), and
//! the number of tests `m` run in the primary study. It is validated once at
//! construction and immutable afterwards.

use rv_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;

/// Validated study data.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyData {
    p1: Vec<f64>,
    p2: Vec<f64>,
    m: usize,
}

fn check_p_values(name: &str, values: &[f64]) -> Result<()> {
    for (i, &p) in values.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidInput(format!(
                "{name}[{i}] = {p} is not a p-value in [0, 1]"
            )));
        }
    }
    Ok(())
}

impl StudyData {
    pub fn new(p1: Vec<f64>, p2: Vec<f64>, m: usize) -> Result<Self> {
        if p1.len() != p2.len() {
            return Err(Error::LengthMismatch {
                p1_len: p1.len(),
                p2_len: p2.len(),
            });
        }
        if p1.is_empty() {
            return Err(Error::InvalidInput("no features selected".to_string()));
        }
        check_p_values("p1", &p1)?;
        check_p_values("p2", &p2)?;
        if m < p1.len() {
            return Err(Error::TooFewPrimaryTests { m, n: p1.len() });
        }
        Ok(Self { p1, p2, m })
    }

    pub fn p1(&self) -> &[f64] {
        &self.p1
    }

    pub fn p2(&self) -> &[f64] {
        &self.p2
    }

    /// Number of tests in the primary study.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of selected features.
    pub fn len(&self) -> usize {
        self.p1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p1.is_empty()
    }

    /// SHA-256 of `m` and both p-value vectors, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.m as u64).to_le_bytes());
        hasher.update((self.len() as u64).to_le_bytes());
        for p in self.p1.iter().chain(&self.p2) {
            hasher.update(p.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Study document accepted by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyInput {
    pub p1: Vec<f64>,
    pub p2: Vec<f64>,
    #[serde(default)]
    pub m: Option<usize>,
    /// Optional feature names, echoed in reports.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl StudyInput {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_json(&text)
    }

    pub fn parse_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate into study data. `m_override` takes precedence over the
    /// document's own `m`.
    pub fn into_study(self, m_override: Option<usize>) -> Result<(StudyData, Option<Vec<String>>)> {
        let m = m_override.or(self.m).ok_or_else(|| {
            Error::InvalidInput("number of primary-study tests `m` is required".to_string())
        })?;
        if let Some(labels) = &self.labels {
            if labels.len() != self.p1.len() {
                return Err(Error::InvalidInput(format!(
                    "{} labels given for {} features",
                    labels.len(),
                    self.p1.len()
                )));
            }
        }
        let study = StudyData::new(self.p1, self.p2, m)?;
        Ok((study, self.labels))
    }
}
