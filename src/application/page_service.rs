use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::page::{slugify, NewPage, Page, PagePatch};
use crate::domain::ports::{PageRepository, ProductRepository};
use crate::domain::product::Product;

const NO_PAGE: &str = "Page not found for this user.";

#[derive(Debug, Clone, PartialEq)]
pub struct PageWithProducts {
    pub page: Page,
    pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct PageService {
    pages: Arc<dyn PageRepository>,
    products: Arc<dyn ProductRepository>,
}

impl PageService {
    pub fn new(pages: Arc<dyn PageRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { pages, products }
    }

    /// Create the single page of `owner_id`. The slug is derived from the
    /// title and must not be taken by any other page.
    pub fn create(
        &self,
        owner_id: i32,
        title: String,
        description: Option<String>,
    ) -> Result<PageWithProducts, DomainError> {
        if self.pages.find_by_owner(owner_id)?.is_some() {
            return Err(DomainError::Conflict(
                "User already has a page. Use the update endpoint instead.".to_string(),
            ));
        }

        let slug = slugify(&title);
        if self.pages.find_by_slug(&slug)?.is_some() {
            return Err(DomainError::Conflict(
                "Page with this title already exists, creating a duplicate slug.".to_string(),
            ));
        }

        let page = self.pages.create(NewPage {
            slug,
            title,
            description,
            owner_id,
        })?;
        log::info!("Created page id={} slug={}", page.id, page.slug);

        Ok(PageWithProducts {
            page,
            products: Vec::new(),
        })
    }

    pub fn get_for_owner(&self, owner_id: i32) -> Result<PageWithProducts, DomainError> {
        let page = self.owned_page(owner_id)?;
        self.with_products(page)
    }

    /// Merge `patch` into the caller's page. The slug stays as it was.
    pub fn update_for_owner(
        &self,
        owner_id: i32,
        patch: PagePatch,
    ) -> Result<PageWithProducts, DomainError> {
        let mut page = self.owned_page(owner_id)?;
        patch.apply(&mut page);
        let page = self.pages.update(&page)?;
        self.with_products(page)
    }

    pub fn delete_for_owner(&self, owner_id: i32) -> Result<(), DomainError> {
        let page = self.owned_page(owner_id)?;
        self.pages.delete_cascade(page.id)?;
        log::info!("Deleted page id={} slug={}", page.id, page.slug);
        Ok(())
    }

    pub fn get_public(&self, slug: &str) -> Result<PageWithProducts, DomainError> {
        let page = self
            .pages
            .find_by_slug(slug)?
            .ok_or_else(|| DomainError::NotFound("Page not found".to_string()))?;
        self.with_products(page)
    }

    fn owned_page(&self, owner_id: i32) -> Result<Page, DomainError> {
        self.pages
            .find_by_owner(owner_id)?
            .ok_or_else(|| DomainError::NotFound(NO_PAGE.to_string()))
    }

    fn with_products(&self, page: Page) -> Result<PageWithProducts, DomainError> {
        let products = self.products.list_for_page(page.id)?;
        Ok(PageWithProducts { page, products })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::NewProduct;
    use crate::infrastructure::memory::InMemoryStore;

    fn setup() -> (Arc<InMemoryStore>, PageService) {
        let store = Arc::new(InMemoryStore::default());
        let service = PageService::new(store.clone(), store.clone());
        (store, service)
    }

    #[test]
    fn create_assigns_slug_from_title() {
        let (_, pages) = setup();
        let created = pages
            .create(1, "My Shop".to_string(), None)
            .expect("create");

        assert_eq!(created.page.slug, "my-shop");
        assert_eq!(created.page.owner_id, 1);
        assert!(created.products.is_empty());
    }

    #[test]
    fn second_page_for_same_owner_is_a_conflict() {
        let (_, pages) = setup();
        pages.create(1, "First".to_string(), None).expect("create");

        assert!(matches!(
            pages.create(1, "Second".to_string(), None),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn colliding_slug_is_a_conflict_without_suffixing() {
        let (_, pages) = setup();
        pages.create(1, "My Shop".to_string(), None).expect("create");

        match pages.create(2, "my   SHOP".to_string(), None) {
            Err(DomainError::Conflict(msg)) => assert!(msg.contains("duplicate slug")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            pages.get_for_owner(2),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn rename_keeps_slug() {
        let (_, pages) = setup();
        pages
            .create(1, "My Shop".to_string(), Some("hello".to_string()))
            .expect("create");

        let updated = pages
            .update_for_owner(
                1,
                PagePatch {
                    title: Some("Brand New Name".to_string()),
                    description: None,
                },
            )
            .expect("update");

        assert_eq!(updated.page.title, "Brand New Name");
        assert_eq!(updated.page.slug, "my-shop");
        assert_eq!(updated.page.description.as_deref(), Some("hello"));
        assert!(pages.get_public("my-shop").is_ok());
    }

    #[test]
    fn update_without_page_is_not_found() {
        let (_, pages) = setup();
        assert!(matches!(
            pages.update_for_owner(1, PagePatch::default()),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn public_page_includes_products() {
        let (store, pages) = setup();
        let created = pages.create(1, "My Shop".to_string(), None).expect("create");
        ProductRepository::create(
            store.as_ref(),
            created.page.id,
            NewProduct {
                name: "Widget".to_string(),
                description: None,
                price: 9.99,
            },
        )
        .expect("product");

        let public = pages.get_public("my-shop").expect("public");
        assert_eq!(public.products.len(), 1);
        assert_eq!(public.products[0].name, "Widget");
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let (_, pages) = setup();
        assert!(matches!(
            pages.get_public("nope"),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn delete_frees_the_slug() {
        let (_, pages) = setup();
        pages.create(1, "My Shop".to_string(), None).expect("create");
        pages.delete_for_owner(1).expect("delete");

        assert!(pages.get_public("my-shop").is_err());
        pages
            .create(2, "My Shop".to_string(), None)
            .expect("slug is free again");
    }
}
