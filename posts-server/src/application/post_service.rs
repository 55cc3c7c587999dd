use std::sync::Arc;

use crate::data::cover_source::CoverSource;
use crate::data::metadata_store::MetadataStore;
use crate::data::object_store::ObjectStore;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, decode_content};
use tracing::{debug, info, instrument};

pub struct PostService<O, M, C>
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    objects: Arc<O>,
    metadata: Arc<M>,
    covers: Arc<C>,
}

impl<O, M, C> Clone for PostService<O, M, C>
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
            metadata: Arc::clone(&self.metadata),
            covers: Arc::clone(&self.covers),
        }
    }
}

impl<O, M, C> PostService<O, M, C>
where
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    C: CoverSource + 'static,
{
    pub fn new(objects: Arc<O>, metadata: Arc<M>, covers: Arc<C>) -> Self {
        Self {
            objects,
            metadata,
            covers,
        }
    }

    /// Builds one post per object in `bucket`, in listing order.
    ///
    /// Every object needs a metadata record in `table` carrying its author.
    /// The first failing object aborts the whole listing.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, bucket: &str, table: &str) -> Result<Vec<Post>, DomainError> {
        let keys = self.objects.list_keys(bucket).await?;
        if keys.is_empty() {
            debug!("bucket is empty");
            return Ok(Vec::new());
        }

        let mut posts = Vec::with_capacity(keys.len());
        for key in keys {
            let body = self.objects.get_object(bucket, &key).await?;
            let content = decode_content(&key, body)?;

            let record = self
                .metadata
                .get_record(table, &key)
                .await?
                .ok_or_else(|| DomainError::MetadataNotFound {
                    table: table.to_owned(),
                    key: key.clone(),
                })?;
            let author = record.author(&key)?.to_owned();

            let cover = self.covers.fetch_cover().await?;

            posts.push(Post::new(key, author, content, &cover));
        }

        info!(count = posts.len(), "posts aggregated");
        Ok(posts)
    }
}
