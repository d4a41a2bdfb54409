//! Static president metadata used by the chart stages.
//!
//! The loaders reject duplicate keys instead of letting a later entry
//! silently overwrite an earlier one, so each president must appear exactly
//! once (Grover Cleveland's non-consecutive terms are a single entry).

use crate::error::{PipelineError, Result};
use plotters::style::RGBColor;
use std::collections::HashMap;

pub const PRESIDENT_PARTIES: &[(&str, &str)] = &[
    ("George Washington", "Unaffiliated"),
    ("John Adams", "Federalist"),
    ("Thomas Jefferson", "Democratic-Republican"),
    ("James Madison", "Democratic-Republican"),
    ("James Monroe", "Democratic-Republican"),
    ("John Quincy Adams", "Democratic-Republican"),
    ("Andrew Jackson", "Democrat"),
    ("Martin Van Buren", "Democrat"),
    ("William Harrison", "Whig"),
    ("John Tyler", "Whig"),
    ("James K. Polk", "Democrat"),
    ("Zachary Taylor", "Whig"),
    ("Millard Fillmore", "Whig"),
    ("Franklin Pierce", "Democrat"),
    ("James Buchanan", "Democrat"),
    ("Abraham Lincoln", "Republican"),
    ("Andrew Johnson", "Democrat"),
    ("Ulysses S. Grant", "Republican"),
    ("Rutherford B. Hayes", "Republican"),
    ("James A. Garfield", "Republican"),
    ("Chester A. Arthur", "Republican"),
    ("Grover Cleveland", "Democrat"),
    ("Benjamin Harrison", "Republican"),
    ("William McKinley", "Republican"),
    ("Theodore Roosevelt", "Republican"),
    ("William Taft", "Republican"),
    ("Woodrow Wilson", "Democrat"),
    ("Warren G. Harding", "Republican"),
    ("Calvin Coolidge", "Republican"),
    ("Herbert Hoover", "Republican"),
    ("Franklin D. Roosevelt", "Democrat"),
    ("Harry S. Truman", "Democrat"),
    ("Dwight D. Eisenhower", "Republican"),
    ("John F. Kennedy", "Democrat"),
    ("Lyndon B. Johnson", "Democrat"),
    ("Richard M. Nixon", "Republican"),
    ("Gerald Ford", "Republican"),
    ("Jimmy Carter", "Democrat"),
    ("Ronald Reagan", "Republican"),
    ("George H. W. Bush", "Republican"),
    ("Bill Clinton", "Democrat"),
    ("George W. Bush", "Republican"),
    ("Barack Obama", "Democrat"),
    ("Donald Trump", "Republican"),
    ("Joe Biden", "Democrat"),
];

pub const PRESIDENCY_YEARS: &[(&str, &str)] = &[
    ("George Washington", "(1789-1797)"),
    ("John Adams", "(1797-1801)"),
    ("Thomas Jefferson", "(1801-1809)"),
    ("James Madison", "(1809-1817)"),
    ("James Monroe", "(1817-1825)"),
    ("John Quincy Adams", "(1825-1829)"),
    ("Andrew Jackson", "(1829-1837)"),
    ("Martin Van Buren", "(1837-1841)"),
    ("William Harrison", "(1841-1841)"),
    ("John Tyler", "(1841-1845)"),
    ("James K. Polk", "(1845-1849)"),
    ("Zachary Taylor", "(1849-1850)"),
    ("Millard Fillmore", "(1850-1853)"),
    ("Franklin Pierce", "(1853-1857)"),
    ("James Buchanan", "(1857-1861)"),
    ("Abraham Lincoln", "(1861-1865)"),
    ("Andrew Johnson", "(1865-1869)"),
    ("Ulysses S. Grant", "(1869-1877)"),
    ("Rutherford B. Hayes", "(1877-1881)"),
    ("James A. Garfield", "(1881-1881)"),
    ("Chester A. Arthur", "(1881-1885)"),
    ("Grover Cleveland", "(1885-1889, 1893-1897)"),
    ("Benjamin Harrison", "(1889-1893)"),
    ("William McKinley", "(1897-1901)"),
    ("Theodore Roosevelt", "(1901-1909)"),
    ("William Taft", "(1909-1913)"),
    ("Woodrow Wilson", "(1913-1921)"),
    ("Warren G. Harding", "(1921-1923)"),
    ("Calvin Coolidge", "(1923-1929)"),
    ("Herbert Hoover", "(1929-1933)"),
    ("Franklin D. Roosevelt", "(1933-1945)"),
    ("Harry S. Truman", "(1945-1953)"),
    ("Dwight D. Eisenhower", "(1953-1961)"),
    ("John F. Kennedy", "(1961-1963)"),
    ("Lyndon B. Johnson", "(1963-1969)"),
    ("Richard M. Nixon", "(1969-1974)"),
    ("Gerald Ford", "(1974-1977)"),
    ("Jimmy Carter", "(1977-1981)"),
    ("Ronald Reagan", "(1981-1989)"),
    ("George H. W. Bush", "(1989-1993)"),
    ("Bill Clinton", "(1993-2001)"),
    ("George W. Bush", "(2001-2009)"),
    ("Barack Obama", "(2009-2017)"),
    ("Donald Trump", "(2017-2021)"),
    ("Joe Biden", "(2021-Present)"),
];

/// Bar colors per party.
pub fn party_color(party: &str) -> RGBColor {
    match party {
        "Republican" => RGBColor(205, 55, 55),
        "Democrat" => RGBColor(55, 90, 205),
        "Federalist" => RGBColor(128, 128, 128),
        "Democratic-Republican" => RGBColor(30, 110, 50),
        "Whig" => RGBColor(130, 60, 170),
        _ => RGBColor(20, 20, 20),
    }
}

fn build_unique_map(table: &'static [(&'static str, &'static str)], what: &str) -> Result<HashMap<&'static str, &'static str>> {
    let mut map = HashMap::with_capacity(table.len());
    for (key, value) in table {
        if map.insert(*key, *value).is_some() {
            return Err(PipelineError::ConfigValidationError(format!(
                "Duplicate {} entry for '{}'",
                what, key
            )));
        }
    }
    Ok(map)
}

/// President -> party, failing on duplicate keys.
pub fn party_map() -> Result<HashMap<&'static str, &'static str>> {
    build_unique_map(PRESIDENT_PARTIES, "party")
}

/// President -> presidency years, failing on duplicate keys.
pub fn years_map() -> Result<HashMap<&'static str, &'static str>> {
    build_unique_map(PRESIDENCY_YEARS, "presidency-years")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_no_duplicates() {
        let parties = party_map().unwrap();
        let years = years_map().unwrap();
        assert_eq!(parties.len(), PRESIDENT_PARTIES.len());
        assert_eq!(years.len(), PRESIDENCY_YEARS.len());
    }

    #[test]
    fn test_cleveland_terms_are_one_entry() {
        let years = years_map().unwrap();
        assert_eq!(years["Grover Cleveland"], "(1885-1889, 1893-1897)");
    }

    #[test]
    fn test_duplicate_key_fails_loudly() {
        static BROKEN: &[(&str, &str)] = &[("A", "x"), ("A", "y")];
        let result = build_unique_map(BROKEN, "test");
        assert!(matches!(
            result,
            Err(PipelineError::ConfigValidationError(_))
        ));
    }

    #[test]
    fn test_every_party_entry_has_years() {
        let years = years_map().unwrap();
        for (president, _) in PRESIDENT_PARTIES {
            assert!(years.contains_key(president), "missing years for {}", president);
        }
    }
}
