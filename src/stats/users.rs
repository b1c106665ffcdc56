// src/stats/users.rs

//! User statistics.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Account, Gender, Role};

/// Counts per recognized role. Unknown codes are in `total` only; the
/// internal system role is excluded everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RoleBreakdown {
    pub admin: usize,
    pub lecturer: usize,
    pub student: usize,
    pub hod: usize,
}

/// Counts per gender code.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct GenderBreakdown {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

/// Aggregated user statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    pub by_role: RoleBreakdown,
    pub by_gender: GenderBreakdown,
    pub with_avatar: usize,
    pub with_phone: usize,
    /// Mean age over accounts whose parsed age falls in (0, 100); absent
    /// when no account has a usable age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_age: Option<u32>,
}

/// Compute user statistics over the fetched accounts.
pub fn compute_user_stats(accounts: &[Account], today: NaiveDate) -> UserStats {
    let mut stats = UserStats::default();
    let mut age_sum: i64 = 0;
    let mut age_count: i64 = 0;

    for account in accounts {
        if account.role == Role::System {
            continue;
        }
        stats.total += 1;

        match account.role {
            Role::Admin => stats.by_role.admin += 1,
            Role::Lecturer => stats.by_role.lecturer += 1,
            Role::Student => stats.by_role.student += 1,
            Role::Hod => stats.by_role.hod += 1,
            Role::System | Role::Unknown => {}
        }

        match account.gender {
            Gender::Male => stats.by_gender.male += 1,
            Gender::Female => stats.by_gender.female += 1,
            Gender::Other => stats.by_gender.other += 1,
        }

        if account.has_avatar() {
            stats.with_avatar += 1;
        }
        if account.has_phone() {
            stats.with_phone += 1;
        }

        if let Some(age) = account.age(today) {
            if age > 0 && age < 100 {
                age_sum += i64::from(age);
                age_count += 1;
            }
        }
    }

    if age_count > 0 {
        stats.average_age = Some((age_sum as f64 / age_count as f64).round() as u32);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_account(id: i64, role: i32) -> Account {
        serde_json::from_str(&format!(r#"{{"id": {id}, "role": {role}}}"#)).unwrap()
    }

    fn make_account_born(id: i64, dob: &str) -> Account {
        serde_json::from_str(&format!(r#"{{"id": {id}, "role": 2, "dateOfBirth": "{dob}"}}"#))
            .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_role_buckets() {
        // 6 students, 2 lecturers, 1 admin, 1 head of department.
        let mut accounts: Vec<Account> = (0..6).map(|i| make_account(i, 2)).collect();
        accounts.push(make_account(6, 1));
        accounts.push(make_account(7, 1));
        accounts.push(make_account(8, 0));
        accounts.push(make_account(9, 3));

        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.total, 10);
        assert_eq!(stats.by_role.student, 6);
        assert_eq!(stats.by_role.lecturer, 2);
        assert_eq!(stats.by_role.admin, 1);
        assert_eq!(stats.by_role.hod, 1);
    }

    #[test]
    fn test_system_role_excluded_entirely() {
        let accounts = vec![make_account(1, 2), make_account(2, 4)];
        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_unknown_role_in_total_only() {
        let accounts = vec![make_account(1, 2), make_account(2, 42)];
        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.total, 2);
        let bucketed = stats.by_role.admin
            + stats.by_role.lecturer
            + stats.by_role.student
            + stats.by_role.hod;
        assert_eq!(bucketed, 1);
    }

    #[test]
    fn test_average_age_rounds() {
        let accounts = vec![
            make_account_born(1, "2000-01-01"), // 24
            make_account_born(2, "2001-01-01"), // 23
        ];
        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.average_age, Some(24)); // 23.5 rounds up
    }

    #[test]
    fn test_average_age_ignores_out_of_range() {
        let accounts = vec![
            make_account_born(1, "1800-01-01"), // 224: out of range
            make_account_born(2, "2000-01-01"),
        ];
        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.average_age, Some(24));
    }

    #[test]
    fn test_average_age_absent_when_no_valid_age() {
        let accounts = vec![make_account(1, 2)];
        let stats = compute_user_stats(&accounts, today());
        assert_eq!(stats.average_age, None);
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_user_stats(&[], today());
        assert_eq!(stats, UserStats::default());
    }
}
