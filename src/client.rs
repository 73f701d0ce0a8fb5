use std::fs;
use std::io::Read;
use std::path::Path;

use crate::config::{ServiceConfig, compile_keep_pattern};
use crate::errors::{CloudinaryError, Result};
use crate::interfaces::{HttpResponse, HttpTransport, Transport};
use crate::naming;
use crate::resource::{DestroyResponse, ResourceType, UploadResponse, UploadedResource};
use crate::signer::{self, Operation, SignedRequest};
use crate::urls;
use crate::utils::log_utils::Logger;
use crate::walk_dirs;

/// How the public id of one uploaded file is chosen
#[derive(Debug, Clone, Copy)]
enum Naming<'a> {
    /// No id is sent; the remote service assigns one
    Random,
    /// Parent directory + file name
    Flat,
    /// Path relative to the root of a directory upload
    Tree { base: &'a Path },
}

/// Client for one remote account.
///
/// Owns its configuration for its whole lifetime. Every call is a blocking
/// sequence of derive id, sign, send and interpret.
pub struct CloudinaryService<T: Transport = HttpTransport> {
    config: ServiceConfig,
    transport: T,
    logger: Logger,
}

impl CloudinaryService<HttpTransport> {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    /// # Errors
    ///
    /// Returns a configuration error if the connection URI is invalid.
    pub fn from_uri(uri: &str) -> Result<Self> {
        Ok(Self::new(ServiceConfig::from_uri(uri)?))
    }
}

impl<T: Transport> CloudinaryService<T> {
    pub fn with_transport(config: ServiceConfig, transport: T) -> Self {
        let logger = Logger::new(config.verbose);
        Self {
            config,
            transport,
            logger,
        }
    }

    /// Turn informational output on or off
    pub fn verbose(&mut self, verbose: bool) {
        self.config.verbose = u8::from(verbose);
        self.logger.set_verbosity(self.config.verbose);
    }

    /// Show what would happen without sending anything. This is a dry run.
    pub fn simulate(&mut self, simulate: bool) {
        self.config.simulate = simulate;
    }

    /// Set a pattern of remote public ids that no `delete` call will remove.
    /// Applies to every resource type. A blank pattern leaves the current
    /// setting untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn keep_files(&mut self, pattern: &str) -> Result<()> {
        if let Some(re) = compile_keep_pattern(pattern)? {
            self.config.keep_files_pattern = Some(re);
        }
        Ok(())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cloud_name(&self) -> &str {
        &self.config.cloud_name
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Upload endpoint for images, the default resource type
    pub fn default_upload_uri(&self) -> String {
        urls::default_upload_uri(&self.config.cloud_name)
    }

    /// Access URL of `public_id`, without extension
    pub fn url(&self, public_id: &str, rtype: ResourceType) -> String {
        urls::build_default_url(&self.config.cloud_name, public_id, rtype)
    }

    /// Upload a file or a directory tree.
    ///
    /// `path` is always required: it names the resource (unless
    /// `random_public_id`) and, when `data` is `None`, is the file or
    /// directory to read. With `data`, the content comes from the reader.
    ///
    /// Directories are uploaded recursively, one file at a time, each named
    /// after its path relative to `path`; random ids are never used for them
    /// and `path` itself is returned. For a single file the public id
    /// confirmed by the remote service is returned, e.g. a raw file
    /// `/tmp/css/default.css` becomes `css/default.css` and an image
    /// `/tmp/images/logo.png` becomes `images/logo`.
    ///
    /// # Errors
    ///
    /// Local read failures, transport failures and remote rejections are
    /// returned as-is. A directory upload stops at the first failing file.
    pub fn upload(
        &self,
        path: &Path,
        data: Option<&mut dyn Read>,
        prepend: &str,
        random_public_id: bool,
        rtype: ResourceType,
    ) -> Result<String> {
        let rule = if random_public_id {
            Naming::Random
        } else {
            Naming::Flat
        };

        if data.is_none() {
            let meta = fs::metadata(path).map_err(|e| CloudinaryError::local_io(path, e))?;
            if meta.is_dir() {
                self.upload_tree(path, prepend, rtype)?;
                return Ok(path.display().to_string());
            }
        }

        let uploaded = self.upload_file(path, data, prepend, rule, rtype)?;
        Ok(uploaded.public_id)
    }

    /// Upload every regular file under `root`, in traversal order, and
    /// return what each upload produced.
    ///
    /// # Errors
    ///
    /// Stops at the first failure; files already sent stay uploaded.
    pub fn upload_tree(
        &self,
        root: &Path,
        prepend: &str,
        rtype: ResourceType,
    ) -> Result<Vec<UploadedResource>> {
        self.logger
            .info(&format!("Uploading directory: {}", root.display()));

        let mut uploaded = Vec::new();
        walk_dirs::walk(root, |file| {
            let resource = self.upload_file(file, None, prepend, Naming::Tree { base: root }, rtype)?;
            uploaded.push(resource);
            Ok(())
        })?;
        Ok(uploaded)
    }

    pub fn upload_static_raw(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Raw)
    }

    pub fn upload_static_image(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Image)
    }

    pub fn upload_raw(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Raw)
    }

    pub fn upload_image(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Image)
    }

    pub fn upload_video(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Video)
    }

    pub fn upload_pdf(&self, path: &Path, data: Option<&mut dyn Read>, prepend: &str) -> Result<String> {
        self.upload(path, data, prepend, false, ResourceType::Pdf)
    }

    fn upload_file(
        &self,
        path: &Path,
        data: Option<&mut dyn Read>,
        prepend: &str,
        rule: Naming<'_>,
        rtype: ResourceType,
    ) -> Result<UploadedResource> {
        let path_str = path.to_string_lossy().into_owned();
        let public_id = match rule {
            Naming::Random => None,
            Naming::Flat => Some(naming::derive_flat(&path_str, prepend, rtype)),
            Naming::Tree { base } => Some(naming::derive(
                &path_str,
                &base.to_string_lossy(),
                prepend,
                rtype,
            )),
        };

        let timestamp = signer::unix_timestamp();
        let request = SignedRequest::new(
            &Operation::Upload {
                public_id: public_id.as_deref(),
            },
            &self.config.api_key,
            &timestamp,
            self.config.api_secret(),
        );
        self.logger.debug(&format!(
            "public_id={} timestamp={} signature={}",
            public_id.as_deref().unwrap_or("<random>"),
            timestamp,
            request.signature()
        ));

        let content = read_content(path, data)?;
        let checksum = signer::sha1_hex(&content);
        self.logger.info(&format!("Uploading: {}", path.display()));
        self.logger.debug(&format!("sha1 {checksum}, {} bytes", content.len()));

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.config.simulate {
            let public_id = public_id.unwrap_or(path_str);
            let url = urls::build_url(rtype, &self.config.cloud_name, &public_id, &extension);
            self.logger.info(&format!("URL: {url}"));
            return Ok(UploadedResource {
                local_path: path.to_path_buf(),
                public_id,
                format: extension,
                resource_type: rtype,
                size: content.len() as u64,
                url,
                checksum,
            });
        }

        let endpoint = urls::upload_endpoint(&self.config.cloud_name, rtype);
        self.logger.debug(&format!("POST {endpoint}"));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.clone());
        let resp = self.transport.post_multipart(
            &endpoint,
            request.fields(),
            "file",
            &file_name,
            &content,
        )?;

        if !resp.is_ok() {
            return Err(CloudinaryError::Remote(format!(
                "Request error: {}",
                resp.status_text
            )));
        }
        let info: UploadResponse = serde_json::from_str(&resp.body)?;
        let url = urls::build_url(rtype, &self.config.cloud_name, &info.public_id, &info.format);
        self.logger.info(&format!("URL: {url}"));

        Ok(UploadedResource {
            local_path: path.to_path_buf(),
            public_id: info.public_id,
            format: info.format,
            resource_type: rtype,
            size: info.size,
            url,
            checksum,
        })
    }

    /// Delete the resource `prepend + public_id`.
    ///
    /// Ids matching the keep pattern are left alone, and nothing is sent in
    /// simulate mode; both count as success.
    ///
    /// # Errors
    ///
    /// Transport failures, or the error message returned by the service.
    pub fn delete(&self, public_id: &str, prepend: &str, rtype: ResourceType) -> Result<()> {
        let full_id = format!("{prepend}{public_id}");
        if self.config.is_kept(&full_id) {
            self.logger.normal(&format!("keep {full_id}"));
            return Ok(());
        }
        if self.config.simulate {
            self.logger.normal(&format!("ok (simulated delete of {full_id})"));
            return Ok(());
        }

        let timestamp = signer::unix_timestamp();
        let request = SignedRequest::new(
            &Operation::Destroy { public_id: &full_id },
            &self.config.api_key,
            &timestamp,
            self.config.api_secret(),
        );
        let endpoint = urls::destroy_endpoint(&self.config.cloud_name, rtype);
        self.logger.debug(&format!("POST {endpoint}"));

        let resp = self.transport.post_form(&endpoint, request.fields())?;
        if let Some(result) = interpret_destroy(&resp)? {
            self.logger.normal(&result);
        }
        Ok(())
    }

    /// Rename `prepend + public_id` to `prepend + to_public_id`.
    ///
    /// # Errors
    ///
    /// Transport failures, or the raw response body on any non-200 status.
    pub fn rename(
        &self,
        public_id: &str,
        to_public_id: &str,
        prepend: &str,
        rtype: ResourceType,
    ) -> Result<()> {
        let from = format!("{prepend}{}", strip_leading_slash(public_id));
        let to = format!("{prepend}{}", strip_leading_slash(to_public_id));
        if self.config.simulate {
            self.logger.normal(&format!("ok (simulated rename {from} -> {to})"));
            return Ok(());
        }

        let timestamp = signer::unix_timestamp();
        let request = SignedRequest::new(
            &Operation::Rename { from: &from, to: &to },
            &self.config.api_key,
            &timestamp,
            self.config.api_secret(),
        );
        let endpoint = urls::rename_endpoint(&self.config.cloud_name, rtype);
        self.logger.debug(&format!("POST {endpoint}"));

        let resp = self.transport.post_form(&endpoint, request.fields())?;
        if !resp.is_ok() {
            return Err(CloudinaryError::Remote(resp.body));
        }
        self.logger.info(&format!("Renamed {from} -> {to}"));
        Ok(())
    }
}

fn strip_leading_slash(id: &str) -> &str {
    id.strip_prefix('/').unwrap_or(id)
}

fn read_content(path: &Path, data: Option<&mut dyn Read>) -> Result<Vec<u8>> {
    match data {
        Some(reader) => {
            let mut content = Vec::new();
            reader
                .read_to_end(&mut content)
                .map_err(|e| CloudinaryError::local_io(path, e))?;
            Ok(content)
        }
        None => fs::read(path).map_err(|e| CloudinaryError::local_io(path, e)),
    }
}

// Error bodies look like {"error":{"message":"Missing required parameter - public_id"}}
fn interpret_destroy(resp: &HttpResponse) -> Result<Option<String>> {
    match serde_json::from_str::<DestroyResponse>(&resp.body) {
        Ok(DestroyResponse {
            error: Some(err), ..
        }) => Err(CloudinaryError::Remote(err.message)),
        Ok(body) if resp.is_ok() => Ok(body.result),
        Ok(_) => Err(CloudinaryError::Remote(resp.status_text.clone())),
        Err(_) if !resp.is_ok() => Err(CloudinaryError::Remote(resp.status_text.clone())),
        Err(e) => Err(e.into()),
    }
}
