use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::{PageRepository, ProductRepository};
use crate::domain::product::{NewProduct, Product, ProductPatch};

#[derive(Clone)]
pub struct CatalogService {
    pages: Arc<dyn PageRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(pages: Arc<dyn PageRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { pages, products }
    }

    pub fn create(&self, owner_id: i32, product: NewProduct) -> Result<Product, DomainError> {
        let page = self.pages.find_by_owner(owner_id)?.ok_or_else(|| {
            DomainError::NotFound("You must create a page before adding products.".to_string())
        })?;
        self.products.create(page.id, product)
    }

    pub fn update(
        &self,
        owner_id: i32,
        product_id: i32,
        patch: ProductPatch,
    ) -> Result<Product, DomainError> {
        let mut product = self.owned_product(owner_id, product_id, "update")?;
        patch.apply(&mut product);
        self.products.update(&product)
    }

    pub fn delete(&self, owner_id: i32, product_id: i32) -> Result<Product, DomainError> {
        self.owned_product(owner_id, product_id, "delete")?;
        self.products.delete(product_id)
    }

    /// Existence is checked before ownership so the two failures stay
    /// distinguishable.
    fn owned_product(
        &self,
        owner_id: i32,
        product_id: i32,
        action: &str,
    ) -> Result<Product, DomainError> {
        let (product, product_owner) = self
            .products
            .find_with_owner(product_id)?
            .ok_or_else(|| DomainError::NotFound("Product not found.".to_string()))?;

        if product_owner != owner_id {
            log::warn!("User {owner_id} tried to {action} product {product_id}");
            return Err(DomainError::Unauthorized(format!(
                "Not authorized to {action} this product."
            )));
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::NewPage;
    use crate::infrastructure::memory::InMemoryStore;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: Some("Blue".to_string()),
            price: 9.99,
        }
    }

    fn setup() -> CatalogService {
        let store = Arc::new(InMemoryStore::default());
        for (owner_id, slug) in [(1, "alice"), (2, "bob")] {
            PageRepository::create(
                store.as_ref(),
                NewPage {
                    slug: slug.to_string(),
                    title: slug.to_string(),
                    description: None,
                    owner_id,
                },
            )
            .expect("page");
        }
        CatalogService::new(store.clone(), store)
    }

    #[test]
    fn create_requires_a_page() {
        let catalog = setup();
        match catalog.create(3, widget()) {
            Err(DomainError::NotFound(msg)) => assert!(msg.contains("create a page")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn create_attaches_product_to_owners_page() {
        let catalog = setup();
        let product = catalog.create(1, widget()).expect("create");
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
    }

    #[test]
    fn update_merges_patch() {
        let catalog = setup();
        let product = catalog.create(1, widget()).expect("create");

        let updated = catalog
            .update(
                1,
                product.id,
                ProductPatch {
                    price: Some(5.0),
                    ..Default::default()
                },
            )
            .expect("update");

        assert_eq!(updated.price, 5.0);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.description.as_deref(), Some("Blue"));
    }

    #[test]
    fn foreign_product_is_unauthorized_not_missing() {
        let catalog = setup();
        let product = catalog.create(1, widget()).expect("create");

        assert!(matches!(
            catalog.update(2, product.id, ProductPatch::default()),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            catalog.delete(2, product.id),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn missing_product_is_not_found() {
        let catalog = setup();
        assert!(matches!(
            catalog.update(1, 404, ProductPatch::default()),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            catalog.delete(1, 404),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn delete_returns_removed_product() {
        let catalog = setup();
        let product = catalog.create(1, widget()).expect("create");

        let deleted = catalog.delete(1, product.id).expect("delete");
        assert_eq!(deleted, product);
        assert!(matches!(
            catalog.delete(1, product.id),
            Err(DomainError::NotFound(_))
        ));
    }
}
