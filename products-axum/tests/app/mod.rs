use products_core::{
    models::{Product, ProductDraft, ProductId, ProductUpdate},
    ports::{Application, ProductRepository, Repository},
};
use products_sqlite::{Db, config::SqliteConfig};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// A store wrapper that counts how often the handlers reach it, so tests can
// assert that rejected requests never touch the store.
#[derive(Clone)]
pub struct CountingRepository {
    inner: Db,
    calls: Arc<AtomicUsize>,
}

impl CountingRepository {
    fn hit(&self) -> &Db {
        self.calls.fetch_add(1, Ordering::SeqCst);
        &self.inner
    }
}

impl Repository for CountingRepository {
    type Error = <Db as Repository>::Error;
}

impl ProductRepository for CountingRepository {
    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        self.hit().list_products().await
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, Self::Error> {
        self.hit().get_product(product_id).await
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, Self::Error> {
        self.hit().create_product(draft).await
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, Self::Error> {
        self.hit().update_product(product_id, update).await
    }

    async fn toggle_availability(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Product>, Self::Error> {
        self.hit().toggle_availability(product_id).await
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<bool, Self::Error> {
        self.hit().delete_product(product_id).await
    }
}

#[derive(Clone)]
pub struct TestApp(pub CountingRepository);

impl TestApp {
    pub async fn open() -> TestApp {
        let db = Db::open(&SqliteConfig::default()).await.unwrap();
        TestApp(CountingRepository {
            inner: db,
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// How many store operations the handlers have performed so far.
    pub fn store_calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }
}

impl Application for TestApp {
    type Repository = CountingRepository;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}
