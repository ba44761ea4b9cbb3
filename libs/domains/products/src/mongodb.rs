//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::ReturnDocument,
    Collection, Database,
};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges};
use crate::repository::ProductRepository;

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository.
///
/// Documents are stored schema-free; `name` and `description` are checked
/// here before anything is written.
pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    fn id_filter(id: &str) -> ProductResult<Document> {
        let oid = ObjectId::parse_str(id).map_err(|_| ProductError::InvalidId(id.to_string()))?;
        Ok(doc! { "_id": oid })
    }
}

/// Plain JSON to BSON. Objects always become sub-documents, so a value is
/// never read as an extended-JSON type wrapper.
fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => n.as_f64().map_or(Bson::Null, Bson::Double),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(to_document(map)),
    }
}

/// Inverse of [`json_to_bson`]. Types that only the store can produce fall
/// back to relaxed extended JSON; ObjectIds are rendered as hex strings.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) if f.is_finite() => Value::from(f),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

fn to_document(fields: Map<String, Value>) -> Document {
    fields
        .into_iter()
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

fn new_document(oid: ObjectId, new: NewProduct) -> Document {
    let mut document = doc! {
        "_id": oid,
        "name": new.name,
        "description": new.description,
    };
    document.extend(to_document(new.extra));
    document
}

fn set_document(changes: ProductChanges) -> Document {
    let mut set = to_document(changes.extra);
    if let Some(name) = changes.name {
        set.insert("name", name);
    }
    if let Some(description) = changes.description {
        set.insert("description", description);
    }
    set
}

/// Read a stored document back into the API shape
fn from_document(mut document: Document) -> ProductResult<Product> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        other => {
            return Err(ProductError::Internal(format!(
                "Stored product has an unusable _id: {:?}",
                other
            )));
        }
    };

    let mut fields = match bson_to_json(Bson::Document(document)) {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.insert("_id".to_string(), Value::String(id));

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ProductError::Internal(format!("Stored product is malformed: {}", e)))
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, fields))]
    async fn create(&self, fields: Map<String, Value>) -> ProductResult<Product> {
        let new = NewProduct::from_fields(fields)?;
        let oid = ObjectId::new();
        let document = new_document(oid, new);

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %oid, "Product created");
        from_document(document)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents.into_iter().map(from_document).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let filter = Self::id_filter(id)?;

        self.collection
            .find_one(filter)
            .await?
            .map(from_document)
            .transpose()
    }

    #[instrument(skip(self, fields))]
    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> ProductResult<Option<Product>> {
        let filter = Self::id_filter(id)?;
        let changes = ProductChanges::from_fields(fields)?;

        let updated = if changes.is_empty() {
            self.collection.find_one(filter).await?
        } else {
            let update = doc! { "$set": set_document(changes) };
            self.collection
                .find_one_and_update(filter, update)
                .return_document(ReturnDocument::After)
                .await?
        };

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated");
        }
        updated.map(from_document).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_delete(&self, id: &str) -> ProductResult<Option<Product>> {
        let filter = Self::id_filter(id)?;
        let deleted = self.collection.find_one_and_delete(filter).await?;

        if deleted.is_some() {
            tracing::info!(product_id = %id, "Product deleted");
        }
        deleted.map(from_document).transpose()
    }
}
