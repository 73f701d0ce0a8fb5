use crate::resource::ResourceType;

pub const BASE_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1";
pub const BASE_RESOURCE_URL: &str = "https://res.cloudinary.com";

/// Access URL of an uploaded resource.
///
/// Image-token resources are addressed with their format appended; the
/// identifiers of other types already carry whatever extension they keep.
pub fn build_url(rtype: ResourceType, cloud_name: &str, public_id: &str, extension: &str) -> String {
    let token = rtype.wire_token();
    let base = format!("{BASE_RESOURCE_URL}/{cloud_name}/{token}/upload/{public_id}");
    if token != "image" || extension.is_empty() {
        base
    } else {
        format!("{base}.{extension}")
    }
}

/// Access URL without an extension, for when the stored format is unknown.
pub fn build_default_url(cloud_name: &str, public_id: &str, rtype: ResourceType) -> String {
    format!(
        "{BASE_RESOURCE_URL}/{cloud_name}/{}/upload/{public_id}",
        rtype.wire_token()
    )
}

pub fn default_upload_uri(cloud_name: &str) -> String {
    upload_endpoint(cloud_name, ResourceType::Image)
}

pub fn upload_endpoint(cloud_name: &str, rtype: ResourceType) -> String {
    format!("{BASE_UPLOAD_URL}/{cloud_name}/{}/upload/", rtype.wire_token())
}

pub fn destroy_endpoint(cloud_name: &str, rtype: ResourceType) -> String {
    format!("{BASE_UPLOAD_URL}/{cloud_name}/{}/destroy/", rtype.wire_token())
}

pub fn rename_endpoint(cloud_name: &str, rtype: ResourceType) -> String {
    format!("{BASE_UPLOAD_URL}/{cloud_name}/{}/rename", rtype.wire_token())
}
