use employees_api::db::txn_policy::{current, TxnPolicy};

#[test]
fn test_default_policy_commits() {
    // This binary never sets a policy
    assert_eq!(current(), TxnPolicy::CommitOnOk);
}
