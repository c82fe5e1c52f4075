//! Per-kind CRUD mirror of a remote collection.
//!
//! Writes are applied locally only after the service confirms them, using
//! the single record the service echoes back. Nothing is re-fetched after a
//! write, so server-side effects on sibling records are not reflected until
//! the next `fetch_all`.

use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use storefront_core::entity::{Entity, EntityCollection, EntityId, Operation, envelope};
use storefront_core::error::{Result, StorefrontError};
use storefront_core::service::{RemoteService, ServiceError};

pub struct EntityCache<E: Entity> {
    service: Arc<dyn RemoteService>,
    records: RwLock<EntityCollection<E>>,
}

impl<E: Entity> EntityCache<E> {
    /// Creates an empty cache backed by `service`.
    pub fn new(service: Arc<dyn RemoteService>) -> Self {
        Self {
            service,
            records: RwLock::new(EntityCollection::new()),
        }
    }

    /// Replaces the whole collection with the service's current list.
    ///
    /// # Returns
    ///
    /// The number of records now cached.
    ///
    /// # Errors
    ///
    /// `StorefrontError::Fetch`; the collection is left unchanged.
    pub async fn fetch_all(&self) -> Result<usize> {
        let kind = E::KIND;
        let records: Vec<E> = self
            .call(Operation::FetchAll, self.service.get(&kind.collection_path()))
            .await
            .and_then(|body| Self::decode(Operation::FetchAll, body, kind.list_envelope()))?;

        let mut collection = self.write();
        let dropped = collection.replace_all(records);
        tracing::debug!(
            "[EntityCache] Loaded {} {} ({} duplicate(s) dropped)",
            collection.len(),
            kind.plural(),
            dropped
        );
        Ok(collection.len())
    }

    /// Fetches one record without touching the collection.
    ///
    /// # Errors
    ///
    /// `StorefrontError::FetchOne`.
    pub async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        let kind = E::KIND;
        let body = self
            .call(Operation::FetchOne, self.service.get(&kind.record_path(id)))
            .await?;
        Self::decode(Operation::FetchOne, body, kind.single_envelope())
    }

    /// Creates a record remotely and appends the confirmed record.
    ///
    /// # Arguments
    ///
    /// * `data` - Request body; any JSON-serializable value
    ///
    /// # Errors
    ///
    /// `StorefrontError::Create`; the collection is left unchanged.
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<E> {
        let kind = E::KIND;
        let body = Self::to_body(Operation::Create, data)?;
        let response = self
            .call(Operation::Create, self.service.post(&kind.collection_path(), &body))
            .await?;
        let record: E = Self::decode(Operation::Create, response, kind.created_envelope())?;

        if self.write().append(record.clone()) {
            tracing::debug!("[EntityCache] Created {} {}", kind.singular(), record.id());
        } else {
            tracing::warn!(
                "[EntityCache] Created {} {} was already cached; replaced in place",
                kind.singular(),
                record.id()
            );
        }
        Ok(record)
    }

    /// Updates a record remotely and swaps in the confirmed record, keeping
    /// its position.
    ///
    /// If `id` is not cached the confirmed record is returned but not stored.
    ///
    /// # Errors
    ///
    /// `StorefrontError::Update`.
    pub async fn update<T: Serialize + ?Sized>(&self, id: &EntityId, updates: &T) -> Result<E> {
        let kind = E::KIND;
        let body = Self::to_body(Operation::Update, updates)?;
        let response = self
            .call(Operation::Update, self.service.patch(&kind.record_path(id), &body))
            .await?;
        let record: E = Self::decode(Operation::Update, response, None)?;

        if !self.write().replace(record.clone()) {
            tracing::warn!(
                "[EntityCache] Update for uncached {} {} dropped",
                kind.singular(),
                record.id()
            );
        }
        Ok(record)
    }

    /// Deletes a record remotely, then locally (no-op if not cached).
    ///
    /// # Errors
    ///
    /// `StorefrontError::Delete`; the collection is left unchanged.
    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        let kind = E::KIND;
        self.call(Operation::Delete, async {
            self.service.delete(&kind.record_path(id)).await.map(|_| Value::Null)
        })
        .await?;

        let removed = self.write().remove(id);
        tracing::debug!(
            "[EntityCache] Deleted {} {} (cached: {})",
            kind.singular(),
            id,
            removed
        );
        Ok(())
    }

    /// Snapshot of the cached records, in order.
    pub fn records(&self) -> Vec<E> {
        self.read().as_slice().to_vec()
    }

    pub fn collection(&self) -> EntityCollection<E> {
        self.read().clone()
    }

    pub fn get(&self, id: &EntityId) -> Option<E> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    async fn call(
        &self,
        operation: Operation,
        request: impl Future<Output = std::result::Result<Value, ServiceError>>,
    ) -> Result<Value> {
        request.await.map_err(|e| {
            tracing::warn!(
                "[EntityCache] {:?} {} failed: {}",
                operation,
                E::KIND.plural(),
                e
            );
            Self::failure(operation, &e)
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(
        operation: Operation,
        body: Value,
        key: Option<&str>,
    ) -> Result<T> {
        envelope::decode(body, key).map_err(|e| {
            let err = ServiceError::decode(e.to_string());
            tracing::warn!(
                "[EntityCache] {:?} {} returned an unexpected body: {}",
                operation,
                E::KIND.plural(),
                err
            );
            Self::failure(operation, &err)
        })
    }

    fn to_body<T: Serialize + ?Sized>(operation: Operation, data: &T) -> Result<Value> {
        serde_json::to_value(data).map_err(|e| {
            StorefrontError::crud(E::KIND, operation, format!("Invalid request body: {}", e))
        })
    }

    fn failure(operation: Operation, err: &ServiceError) -> StorefrontError {
        StorefrontError::crud(
            E::KIND,
            operation,
            err.message_or(E::KIND.default_message(operation)),
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityCollection<E>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityCollection<E>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRemoteService;
    use serde_json::json;
    use storefront_core::entity::{Category, Company, EntityKind, Item, Order};

    fn cache<E: Entity>(service: &Arc<MockRemoteService>) -> EntityCache<E> {
        EntityCache::new(service.clone())
    }

    fn ids<E: Entity>(cache: &EntityCache<E>) -> Vec<EntityId> {
        cache.collection().ids()
    }

    fn int_ids(raw: &[i64]) -> Vec<EntityId> {
        raw.iter().copied().map(EntityId::Int).collect()
    }

    #[tokio::test]
    async fn test_fetch_then_delete_empties_collection() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/categories", json!([{ "category_id": 1, "name": "Tea" }]))
            .ok("DELETE", "/categories/1", Value::Null);
        let categories = cache::<Category>(&service);

        assert_eq!(categories.fetch_all().await.unwrap(), 1);
        categories.delete(&EntityId::Int(1)).await.unwrap();

        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_replaces_not_merges() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/orders", json!([{ "order_id": 1 }, { "order_id": 2 }]))
            .ok("GET", "/orders", json!([{ "order_id": 3 }]));
        let orders = cache::<Order>(&service);

        orders.fetch_all().await.unwrap();
        orders.fetch_all().await.unwrap();

        assert_eq!(ids(&orders), int_ids(&[3]));
    }

    #[tokio::test]
    async fn test_items_list_is_unwrapped() {
        let service = Arc::new(MockRemoteService::new());
        service.ok(
            "GET",
            "/items",
            json!({ "items": [{ "item_id": 7, "price": 12 }, { "item_id": 8 }] }),
        );
        let items = cache::<Item>(&service);

        items.fetch_all().await.unwrap();

        assert_eq!(ids(&items), int_ids(&[7, 8]));
        assert_eq!(items.get(&EntityId::Int(7)).unwrap().attribute("price"), Some(&json!(12)));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_collection() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/companies", json!([{ "company_id": 1 }]))
            .fail("GET", "/companies", 500, None);
        let companies = cache::<Company>(&service);
        companies.fetch_all().await.unwrap();

        let err = companies.fetch_all().await.unwrap_err();

        assert_eq!(
            err,
            StorefrontError::Fetch {
                kind: EntityKind::Company,
                message: "Failed To Fetch Companies".to_string(),
            }
        );
        assert_eq!(ids(&companies), int_ids(&[1]));
    }

    #[tokio::test]
    async fn test_service_message_wins_over_default() {
        let service = Arc::new(MockRemoteService::new());
        service.fail("POST", "/items", 422, Some("Price is required"));
        let items = cache::<Item>(&service);

        let err = items.create(&json!({ "name": "Mug" })).await.unwrap_err();

        assert_eq!(err.message(), "Price is required");
        assert!(matches!(err, StorefrontError::Create { kind: EntityKind::Item, .. }));
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_at_end() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/orders", json!([{ "order_id": 5 }, { "order_id": 2 }]))
            .ok("POST", "/orders", json!({ "order_id": 9, "total": 30 }));
        let orders = cache::<Order>(&service);
        orders.fetch_all().await.unwrap();

        let created = orders.create(&json!({ "total": 30 })).await.unwrap();

        assert_eq!(created.id(), &EntityId::Int(9));
        assert_eq!(ids(&orders), int_ids(&[5, 2, 9]));
        assert_eq!(service.calls()[1].body, Some(json!({ "total": 30 })));
    }

    #[tokio::test]
    async fn test_created_category_is_unwrapped() {
        let service = Arc::new(MockRemoteService::new());
        service.ok(
            "POST",
            "/categories",
            json!({ "categories": { "category_id": 4, "name": "Snacks" } }),
        );
        let categories = cache::<Category>(&service);

        let created = categories.create(&json!({ "name": "Snacks" })).await.unwrap();

        assert_eq!(created.id(), &EntityId::Int(4));
        assert_eq!(ids(&categories), int_ids(&[4]));
    }

    #[tokio::test]
    async fn test_update_preserves_position() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok(
                "GET",
                "/items",
                json!({ "items": [{ "item_id": 1 }, { "item_id": 2, "name": "old" }, { "item_id": 3 }] }),
            )
            .ok("PATCH", "/items/2", json!({ "item_id": 2, "name": "new" }));
        let items = cache::<Item>(&service);
        items.fetch_all().await.unwrap();

        items.update(&EntityId::Int(2), &json!({ "name": "new" })).await.unwrap();

        assert_eq!(ids(&items), int_ids(&[1, 2, 3]));
        assert_eq!(items.get(&EntityId::Int(2)).unwrap().attribute("name"), Some(&json!("new")));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/companies", json!([{ "company_id": 1, "name": "Acme" }]))
            .ok("PATCH", "/companies/42", json!({ "company_id": 42, "name": "Ghost" }));
        let companies = cache::<Company>(&service);
        companies.fetch_all().await.unwrap();
        let before = serde_json::to_string(&companies.collection()).unwrap();

        let returned = companies.update(&EntityId::Int(42), &json!({ "name": "Ghost" })).await.unwrap();

        assert_eq!(returned.id(), &EntityId::Int(42));
        assert_eq!(serde_json::to_string(&companies.collection()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_failure() {
        let service = Arc::new(MockRemoteService::new());
        service.fail("PATCH", "/orders/1", 404, None);
        let orders = cache::<Order>(&service);

        let err = orders.update(&EntityId::Int(1), &json!({})).await.unwrap_err();

        assert_eq!(err.message(), "Failed To Update Order");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/categories", json!([{ "category_id": 1 }]))
            .fail("DELETE", "/categories/1", 409, Some("Category has items"));
        let categories = cache::<Category>(&service);
        categories.fetch_all().await.unwrap();

        let err = categories.delete(&EntityId::Int(1)).await.unwrap_err();

        assert!(matches!(err, StorefrontError::Delete { .. }));
        assert_eq!(err.message(), "Category has items");
        assert_eq!(ids(&categories), int_ids(&[1]));
    }

    #[tokio::test]
    async fn test_delete_uncached_id_succeeds() {
        let service = Arc::new(MockRemoteService::new());
        service.ok("DELETE", "/orders/5", Value::Null);
        let orders = cache::<Order>(&service);

        orders.delete(&EntityId::Int(5)).await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_body_is_operation_error() {
        let service = Arc::new(MockRemoteService::new());
        service.ok("GET", "/orders", json!({ "rows": "nope" }));
        let orders = cache::<Order>(&service);

        let err = orders.fetch_all().await.unwrap_err();

        assert_eq!(err.message(), "Failed To Fetch Orders");
    }

    #[tokio::test]
    async fn test_ids_stay_unique_across_mixed_writes() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("GET", "/items", json!({ "items": [{ "item_id": 1 }, { "item_id": 1 }, { "item_id": 2 }] }))
            .ok("POST", "/items", json!({ "item_id": 2, "name": "dup" }))
            .ok("POST", "/items", json!({ "item_id": 3 }))
            .ok("PATCH", "/items/1", json!({ "item_id": 1, "name": "x" }))
            .ok("DELETE", "/items/2", Value::Null);
        let items = cache::<Item>(&service);

        items.fetch_all().await.unwrap();
        items.create(&json!({})).await.unwrap();
        items.create(&json!({})).await.unwrap();
        items.update(&EntityId::Int(1), &json!({ "name": "x" })).await.unwrap();
        items.delete(&EntityId::Int(2)).await.unwrap();

        assert_eq!(ids(&items), int_ids(&[1, 3]));
    }

    #[tokio::test]
    async fn test_concurrent_creates_both_land() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok("POST", "/orders", json!({ "order_id": 10 }))
            .ok("POST", "/orders", json!({ "order_id": 11 }));
        let orders = cache::<Order>(&service);
        let (first, second) = (json!({ "total": 1 }), json!({ "total": 2 }));

        let (a, b) = tokio::join!(orders.create(&first), orders.create(&second));
        a.unwrap();
        b.unwrap();

        let mut landed = ids(&orders);
        landed.sort();
        assert_eq!(landed, int_ids(&[10, 11]));
    }

    #[tokio::test]
    async fn test_string_ids_round_trip_through_cache() {
        let service = Arc::new(MockRemoteService::new());
        service
            .ok(
                "GET",
                "/companies",
                json!([{ "company_id": "9f1c", "name": "Acme" }, { "company_id": 2 }]),
            )
            .ok("PATCH", "/companies/9f1c", json!({ "company_id": "9f1c", "name": "Acme Ltd" }))
            .ok("DELETE", "/companies/2", Value::Null);
        let companies = cache::<Company>(&service);
        let text_id = EntityId::from("9f1c");

        assert_eq!(companies.fetch_all().await.unwrap(), 2);
        companies.update(&text_id, &json!({ "name": "Acme Ltd" })).await.unwrap();
        companies.delete(&EntityId::Int(2)).await.unwrap();

        assert_eq!(ids(&companies), vec![text_id.clone()]);
        assert_eq!(
            companies.get(&text_id).unwrap().attribute("name"),
            Some(&json!("Acme Ltd"))
        );
    }

    #[tokio::test]
    async fn test_fetch_one_uses_company_envelope() {
        let service = Arc::new(MockRemoteService::new());
        service.ok("GET", "/companies/3", json!({ "company": { "company_id": 3, "name": "Acme" } }));
        let companies = cache::<Company>(&service);

        let company = companies.fetch_one(&EntityId::Int(3)).await.unwrap();

        assert_eq!(company.id(), &EntityId::Int(3));
        assert!(companies.is_empty());
    }
}
