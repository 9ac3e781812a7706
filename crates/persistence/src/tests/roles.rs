// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, create_test_role};
use crate::{PersistenceError, StandardRoleUpdate};

#[test]
fn test_insert_and_get_role() {
    let mut persistence = create_test_persistence();

    let role_id = persistence
        .insert_standard_role(&create_test_role("Network Engineer", "Network Operations"))
        .unwrap();

    let role = persistence
        .get_standard_role(role_id)
        .unwrap()
        .expect("role exists");
    assert_eq!(role.role_title, "Network Engineer");
    assert_eq!(role.department, "Network Operations");
    assert_eq!(role.required_skills, vec!["RAN", "LTE"]);
    assert_eq!(role.version, 1);
    assert!(role.is_active);
}

#[test]
fn test_update_bumps_version_and_keeps_unset_fields() {
    let mut persistence = create_test_persistence();
    let role_id = persistence
        .insert_standard_role(&create_test_role("Network Engineer", "Network Operations"))
        .unwrap();

    let update = StandardRoleUpdate {
        role_title: Some(String::from("Senior Network Engineer")),
        experience_min_years: Some(5),
        ..StandardRoleUpdate::default()
    };
    persistence.update_standard_role(role_id, &update).unwrap();

    let role = persistence.get_standard_role(role_id).unwrap().unwrap();
    assert_eq!(role.role_title, "Senior Network Engineer");
    assert_eq!(role.experience_min_years, 5);
    // Untouched fields survive the edit.
    assert_eq!(role.department, "Network Operations");
    assert_eq!(role.required_skills, vec!["RAN", "LTE"]);
    assert_eq!(role.version, 2);

    persistence
        .update_standard_role(role_id, &StandardRoleUpdate::default())
        .unwrap();
    assert_eq!(
        persistence
            .get_standard_role(role_id)
            .unwrap()
            .unwrap()
            .version,
        3
    );
}

#[test]
fn test_update_missing_role() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        persistence.update_standard_role(7, &StandardRoleUpdate::default()),
        Err(PersistenceError::RoleNotFound(7))
    ));
}

#[test]
fn test_deactivated_roles_drop_out_of_the_active_list() {
    let mut persistence = create_test_persistence();
    let keep = persistence
        .insert_standard_role(&create_test_role("Network Engineer", "Network Operations"))
        .unwrap();
    let retire = persistence
        .insert_standard_role(&create_test_role("Fax Operator", "Office Services"))
        .unwrap();

    persistence.deactivate_standard_role(retire).unwrap();

    let active = persistence.list_standard_roles(false).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, keep);

    let all = persistence.list_standard_roles(true).unwrap();
    assert_eq!(all.len(), 2);
    // The row survives soft-disabling so existing references resolve.
    let retired = persistence.get_standard_role(retire).unwrap().unwrap();
    assert!(!retired.is_active);
}

#[test]
fn test_list_orders_by_id() {
    let mut persistence = create_test_persistence();
    let first = persistence
        .insert_standard_role(&create_test_role("Analyst", "Finance"))
        .unwrap();
    let second = persistence
        .insert_standard_role(&create_test_role("Engineer", "Technology"))
        .unwrap();

    let roles = persistence.list_standard_roles(false).unwrap();
    assert_eq!(
        roles.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![first, second]
    );
}

#[test]
fn test_deactivate_missing_role() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        persistence.deactivate_standard_role(11),
        Err(PersistenceError::RoleNotFound(11))
    ));
}
