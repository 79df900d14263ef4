use super::{
    client::ApiClient,
    types::{ApiError, MasterDataKind, MasterDataPayload, MasterDataRecord},
};

fn collection_path(kind: MasterDataKind) -> String {
    format!("/master/{}", kind.path_segment())
}

fn item_path(kind: MasterDataKind, id: &str) -> String {
    format!("/master/{}/{}", kind.path_segment(), id)
}

impl ApiClient {
    pub async fn list_master_data(
        &self,
        kind: MasterDataKind,
    ) -> Result<Vec<MasterDataRecord>, ApiError> {
        self.get_json(&collection_path(kind), &[]).await
    }

    pub async fn create_master_data(
        &self,
        kind: MasterDataKind,
        payload: &MasterDataPayload,
    ) -> Result<MasterDataRecord, ApiError> {
        let url = self.url(&collection_path(kind)).await;
        let response = self.send(self.http_client().post(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn update_master_data(
        &self,
        kind: MasterDataKind,
        id: &str,
        payload: &MasterDataPayload,
    ) -> Result<MasterDataRecord, ApiError> {
        let url = self.url(&item_path(kind, id)).await;
        let response = self.send(self.http_client().put(url).json(payload)).await?;
        self.map_json_response(response).await
    }

    pub async fn delete_master_data(&self, kind: MasterDataKind, id: &str) -> Result<(), ApiError> {
        self.delete_resource(&item_path(kind, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_type_discriminator() {
        assert_eq!(collection_path(MasterDataKind::Responsibility), "/master/responsibility");
        assert_eq!(item_path(MasterDataKind::Class, "c1"), "/master/class/c1");
    }
}
