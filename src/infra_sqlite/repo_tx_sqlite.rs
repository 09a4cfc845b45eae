use crate::domain_port::{StorageTx, TxManager};
use anyhow::anyhow;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::any::Any;

pub struct SqliteTxManager {
    pool: SqlitePool,
}

impl SqliteTxManager {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteTxManager { pool }
    }
}

#[async_trait::async_trait]
impl TxManager for SqliteTxManager {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>> {
        let tx = self.pool.begin().await.map_err(|e| anyhow!(e))?;
        Ok(Box::new(SqliteTx::new(tx)))
    }
}

pub struct SqliteTx {
    inner: Transaction<'static, Sqlite>,
}

impl SqliteTx {
    pub fn new(inner: Transaction<'static, Sqlite>) -> Self {
        SqliteTx { inner }
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        self.inner.as_mut()
    }
}

#[async_trait::async_trait]
impl StorageTx for SqliteTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.inner.commit().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        self.inner.rollback().await.map_err(|e| anyhow!(e))?;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
