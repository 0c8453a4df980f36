use crate::*;
use omab_core::Utility;
use std::collections::HashMap;
use std::str::FromStr;

/// Precomputed per-arm values keyed by `(level, alpha, beta)`.
///
/// Built once by the caller and handed to the planners that need it. A
/// missing key is a configuration error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    values: HashMap<(usize, u32, u32), Utility>,
}

impl ValueTable {
    pub fn value(&self, level: usize, alpha: u32, beta: u32) -> Result<Utility, SearchError> {
        self.values
            .get(&(level, alpha, beta))
            .copied()
            .ok_or(SearchError::MissingValue { level, alpha, beta })
    }
    pub fn insert(&mut self, level: usize, alpha: u32, beta: u32, value: Utility) {
        self.values.insert((level, alpha, beta), value);
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<((usize, u32, u32), Utility)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = ((usize, u32, u32), Utility)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One `level,alpha,beta,value` line.
struct Record {
    level: usize,
    alpha: u32,
    beta: u32,
    value: Utility,
}

impl TryFrom<&str> for Record {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let fields = s.trim().split(',').map(str::trim).collect::<Vec<_>>();
        let [level, alpha, beta, value] = fields.as_slice() else {
            return Err(anyhow::anyhow!("expected 4 fields, found {}", fields.len()));
        };
        Ok(Self {
            level: level.parse().map_err(|e| anyhow::anyhow!("level: {}", e))?,
            alpha: alpha.parse().map_err(|e| anyhow::anyhow!("alpha: {}", e))?,
            beta: beta.parse().map_err(|e| anyhow::anyhow!("beta: {}", e))?,
            value: value.parse().map_err(|e| anyhow::anyhow!("value: {}", e))?,
        })
    }
}

/// Flat text format: a header line, then `level,alpha,beta,value` records.
/// Blank lines are ignored.
impl FromStr for ValueTable {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.lines()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                Record::try_from(line)
                    .map(|r| ((r.level, r.alpha, r.beta), r.value))
                    .map_err(|e| anyhow::anyhow!("line {} {:?}: {}", i + 1, line, e))
            })
            .collect()
    }
}
