pub mod txn_policy_default;
