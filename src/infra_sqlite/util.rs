use super::repo_tx_sqlite::SqliteTx;
use crate::domain_port::*;
use anyhow::anyhow;

pub fn downcast(tx: &mut dyn StorageTx) -> anyhow::Result<&mut SqliteTx> {
    tx.as_any_mut()
        .downcast_mut::<SqliteTx>()
        .ok_or_else(|| anyhow!("transaction was not opened by the sqlite backend"))
}

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = err {
        return db.is_unique_violation();
    }

    false
}
