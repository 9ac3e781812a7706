// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_standardized_session, create_test_mapping, create_test_persistence,
    create_test_role, create_test_session,
};
use crate::PersistenceError;
use rolemap_domain::{ConfidenceSource, MappingStatus};

#[test]
fn test_atomic_write_creates_roles_and_mappings() {
    let mut persistence = create_test_persistence();
    let session_id = persistence
        .insert_upload_session(&create_test_session("batch"))
        .unwrap();

    let roles = vec![
        create_test_role("Network Engineer", "Network Operations"),
        create_test_role("HR Specialist", "People"),
    ];
    let mappings = vec![
        create_test_mapping(0, "Ntwk Eng II", 92),
        create_test_mapping(0, "Network Eng.", 88),
        create_test_mapping(1, "HR Officer", 61),
    ];

    let result = persistence
        .insert_standardization_result(session_id, &roles, &mappings)
        .unwrap();
    assert_eq!(result.roles_created, 2);
    assert_eq!(result.mappings_created, 3);

    let stored_roles = persistence.list_standard_roles(false).unwrap();
    assert_eq!(stored_roles.len(), 2);

    let stored_mappings = persistence.list_mappings_for_session(session_id).unwrap();
    assert_eq!(stored_mappings.len(), 3);

    // Every mapping resolves to a role created in this run.
    let role_ids: Vec<i64> = stored_roles.iter().map(|r| r.id).collect();
    assert!(
        stored_mappings
            .iter()
            .all(|m| role_ids.contains(&m.standard_role_id))
    );
    assert_eq!(stored_mappings[0].standard_role_id, role_ids[0]);
    assert_eq!(stored_mappings[2].standard_role_id, role_ids[1]);
}

#[test]
fn test_review_flag_follows_confidence() {
    let mut persistence = create_test_persistence();
    let session_id = create_standardized_session(&mut persistence, &[92, 80, 79]);

    let mappings = persistence.list_mappings_for_session(session_id).unwrap();
    assert!(!mappings[0].requires_manual_review);
    assert_eq!(mappings[0].status, "auto_mapped");
    // 80 sits exactly on the threshold and is exempt.
    assert!(!mappings[1].requires_manual_review);
    assert!(mappings[2].requires_manual_review);
    assert_eq!(mappings[2].status, "manual_review");
    assert!(mappings.iter().all(|m| m.confidence_source == "model"));
}

#[test]
fn test_out_of_range_role_index_rolls_everything_back() {
    let mut persistence = create_test_persistence();
    let session_id = persistence
        .insert_upload_session(&create_test_session("rollback"))
        .unwrap();

    let roles = vec![create_test_role("Network Engineer", "Network Operations")];
    let mappings = vec![
        create_test_mapping(0, "Fine", 90),
        create_test_mapping(3, "Dangling", 90),
    ];

    let result = persistence.insert_standardization_result(session_id, &roles, &mappings);
    assert!(matches!(
        result,
        Err(PersistenceError::InvalidRoleReference {
            index: 3,
            role_count: 1
        })
    ));

    // The transaction rolled back: no roles, no mappings.
    assert!(persistence.list_standard_roles(true).unwrap().is_empty());
    assert!(persistence.list_role_mappings().unwrap().is_empty());
}

#[test]
fn test_review_queue_lists_only_queued_mappings() {
    let mut persistence = create_test_persistence();
    create_standardized_session(&mut persistence, &[95, 50, 70]);

    let queue = persistence.list_review_queue().unwrap();
    assert_eq!(queue.len(), 2);
    assert!(queue.iter().all(|m| m.status == "manual_review"));
}

#[test]
fn test_confidence_rewrite_recomputes_flag_but_not_status() {
    let mut persistence = create_test_persistence();
    let session_id = create_standardized_session(&mut persistence, &[90]);
    let mapping_id = persistence.list_mappings_for_session(session_id).unwrap()[0].id;

    persistence
        .update_mapping_confidence(mapping_id, 55, ConfidenceSource::Heuristic)
        .unwrap();

    let mapping = persistence.get_role_mapping(mapping_id).unwrap().unwrap();
    assert_eq!(mapping.confidence, 55);
    assert_eq!(mapping.confidence_source, "heuristic");
    assert!(mapping.requires_manual_review);
    // The review status is provenance-independent.
    assert_eq!(mapping.status, "auto_mapped");
}

#[test]
fn test_review_decision_requires_queued_mapping() {
    let mut persistence = create_test_persistence();
    let session_id = create_standardized_session(&mut persistence, &[60, 95]);
    let mappings = persistence.list_mappings_for_session(session_id).unwrap();
    let queued = mappings[0].id;
    let auto_mapped = mappings[1].id;

    persistence
        .update_mapping_status(queued, MappingStatus::Approved)
        .unwrap();
    assert_eq!(
        persistence
            .get_role_mapping(queued)
            .unwrap()
            .unwrap()
            .status,
        "approved"
    );

    // Decisions are final.
    assert!(matches!(
        persistence.update_mapping_status(queued, MappingStatus::Rejected),
        Err(PersistenceError::MappingNotAwaitingReview(_))
    ));
    // Auto-mapped rows never entered the queue.
    assert!(matches!(
        persistence.update_mapping_status(auto_mapped, MappingStatus::Approved),
        Err(PersistenceError::MappingNotAwaitingReview(_))
    ));
}

#[test]
fn test_confidence_rewrite_on_missing_mapping() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        persistence.update_mapping_confidence(404, 50, ConfidenceSource::Heuristic),
        Err(PersistenceError::MappingNotFound(404))
    ));
}
