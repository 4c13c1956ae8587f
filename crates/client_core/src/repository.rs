use shared::{
    domain::{Product, ProductId},
    error::ApiStatus,
    protocol::{DataEnvelope, ProductPayload, ProductsResponse},
};
use tracing::{debug, info};

use crate::{
    error::Result,
    form::FormDraft,
    session::Credential,
    transport::ApiTransport,
};

/// A confirmed modal, ready to be sent to the catalog API.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Create(FormDraft),
    Update(ProductId, FormDraft),
    Delete(ProductId),
}

/// Thin client over the product endpoints. It never keeps products locally;
/// callers refresh with [`ProductRepository::list`] after a mutation.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    transport: ApiTransport,
}

impl ProductRepository {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self, credential: &Credential) -> Result<Vec<Product>> {
        let request = self
            .transport
            .authorized_get(self.transport.products_url(), credential);
        let response: ProductsResponse = self.transport.send(request).await?;
        debug!(count = response.products.len(), "fetched products");
        Ok(response.products)
    }

    pub async fn create(&self, credential: &Credential, draft: &FormDraft) -> Result<()> {
        let mut payload = draft.to_payload()?;
        payload.id = None;
        let request = self
            .transport
            .authorized_post(self.transport.product_url(None), credential)
            .json(&DataEnvelope { data: payload });
        let status: ApiStatus = self.transport.send(request).await?;
        info!(message = ?status.message_text(), "product created");
        Ok(())
    }

    pub async fn update(
        &self,
        credential: &Credential,
        id: &ProductId,
        draft: &FormDraft,
    ) -> Result<()> {
        let payload = ProductPayload {
            id: Some(id.clone()),
            ..draft.to_payload()?
        };
        let request = self
            .transport
            .authorized_put(self.transport.product_url(Some(id)), credential)
            .json(&DataEnvelope { data: payload });
        let status: ApiStatus = self.transport.send(request).await?;
        info!(product_id = %id, message = ?status.message_text(), "product updated");
        Ok(())
    }

    pub async fn delete(&self, credential: &Credential, id: &ProductId) -> Result<()> {
        let request = self
            .transport
            .authorized_delete(self.transport.product_url(Some(id)), credential);
        let status: ApiStatus = self.transport.send(request).await?;
        info!(product_id = %id, message = ?status.message_text(), "product deleted");
        Ok(())
    }

    pub async fn execute(&self, credential: &Credential, action: &ProductAction) -> Result<()> {
        match action {
            ProductAction::Create(draft) => self.create(credential, draft).await,
            ProductAction::Update(id, draft) => self.update(credential, id, draft).await,
            ProductAction::Delete(id) => self.delete(credential, id).await,
        }
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
