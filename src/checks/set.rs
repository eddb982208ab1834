// src/checks/set.rs

//! # Set
//!
//! Adds "Eko" twice plus "Kurniawan" and "Khannedy" to `students`.
//! The duplicate must be dropped: `SCARD` is 3 and `SMEMBERS` holds the
//! three unique members.
//!
//! Small sets of strings are stored as listpacks by current servers, which
//! iterate in first-insertion order. With `strict` on, that order is part of
//! the assertion; with it off only the membership is compared.

use std::collections::BTreeSet;

use redis::AsyncCommands;

use crate::conn::Probe;
use crate::error::{ProbeError, expect_eq};

const KEY: &str = "students";

pub async fn run(probe: &mut Probe, strict: bool) -> Result<(), ProbeError> {
    probe.purge(&[KEY]).await?;
    let key = probe.key(KEY);

    // SADD returns 1 for a new member, 0 for one already present
    for (member, added) in [("Eko", 1), ("Eko", 0), ("Kurniawan", 1), ("Khannedy", 1)] {
        let n: i64 = probe.conn().sadd(&key, member).await?;
        expect_eq("sadd", added, n)?;
    }

    let card: i64 = probe.conn().scard(&key).await?;
    expect_eq("scard", 3, card)?;

    let members: Vec<String> = probe.conn().smembers(&key).await?;
    compare_members(&MEMBERS, &members, strict)?;

    probe.purge(&[KEY]).await?;
    Ok(())
}

/// Unique members in first-insertion order.
pub const MEMBERS: [&str; 3] = ["Eko", "Kurniawan", "Khannedy"];

/// Compares an `SMEMBERS` reply with the expected members; `strict` also
/// compares the order.
pub fn compare_members(expected: &[&str], got: &[String], strict: bool) -> Result<(), ProbeError> {
    if strict {
        expect_eq("smembers", expected.to_vec(), got.iter().map(String::as_str).collect())
    } else {
        let got: BTreeSet<&str> = got.iter().map(String::as_str).collect();
        expect_eq("smembers", expected.iter().copied().collect(), got)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(members: &[&str]) -> Vec<String> {
        members.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn strict_accepts_insertion_order() {
        assert!(compare_members(&MEMBERS, &reply(&["Eko", "Kurniawan", "Khannedy"]), true).is_ok());
    }

    #[test]
    fn strict_rejects_other_order() {
        let err = compare_members(&MEMBERS, &reply(&["Khannedy", "Eko", "Kurniawan"]), true).unwrap_err();
        assert!(matches!(err, ProbeError::Mismatch { .. }));
    }

    #[test]
    fn relaxed_ignores_order_only() {
        assert!(compare_members(&MEMBERS, &reply(&["Khannedy", "Eko", "Kurniawan"]), false).is_ok());
        // 成员不同仍然失败
        assert!(compare_members(&MEMBERS, &reply(&["Eko", "Kurniawan"]), false).is_err());
        assert!(compare_members(&MEMBERS, &reply(&["Eko", "Kurniawan", "Budi"]), false).is_err());
    }

    #[test]
    fn duplicate_in_reply_fails_strict() {
        assert!(compare_members(&MEMBERS, &reply(&["Eko", "Eko", "Kurniawan", "Khannedy"]), true).is_err());
    }
}
