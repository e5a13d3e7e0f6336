use super::ProductRow;
use crate::Db;
use products_core::{
    models::{Product, ProductDraft, ProductId, ProductUpdate},
    ports::ProductRepository,
};

impl ProductRepository for Db {
    async fn list_products(&self) -> Result<Vec<Product>, Self::Error> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, name, price, availability
            from
                product
            order by
                id
            "#,
        )
        .fetch_all(&self.reader)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, name, price, availability
            from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id.0)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            insert into
                product (name, price, availability)
            values
                ($1, $2, true)
            returning
                id, name, price, availability
            "#,
        )
        .bind(draft.name)
        .bind(draft.price)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            update
                product
            set
                name = $1,
                price = $2,
                availability = $3
            where
                id = $4
            returning
                id, name, price, availability
            "#,
        )
        .bind(update.name)
        .bind(update.price)
        .bind(update.availability)
        .bind(product_id.0)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn toggle_availability(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Product>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            update
                product
            set
                availability = not availability
            where
                id = $1
            returning
                id, name, price, availability
            "#,
        )
        .bind(product_id.0)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r#"
            delete from
                product
            where
                id = $1
            "#,
        )
        .bind(product_id.0)
        .execute(&self.writer)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
