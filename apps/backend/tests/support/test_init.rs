/// Sets the transaction policy to rollback on success for the whole binary.
///
/// Binaries that omit this file keep the default commit behavior.
#[ctor::ctor]
fn init_test_txn_policy() {
    employees_api::db::txn_policy::set_txn_policy(
        employees_api::db::txn_policy::TxnPolicy::RollbackOnOk,
    );
}
