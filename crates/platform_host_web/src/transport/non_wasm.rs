use super::*;

fn unsupported() -> GatewayError {
    GatewayError::Unsupported("http transport requires wasm32")
}

pub async fn get_text(_url: &str) -> GatewayResult<String> {
    Err(unsupported())
}

pub async fn get_bytes(_url: &str) -> GatewayResult<Vec<u8>> {
    Err(unsupported())
}

pub async fn post_json(_url: &str, _body: String) -> GatewayResult<String> {
    Err(unsupported())
}

pub async fn post_file(
    _url: &str,
    _file: &UploadFile,
    _fields: UploadFields<'_>,
) -> GatewayResult<()> {
    Err(unsupported())
}
