use crate::args::{Args, Command};
use crate::client::CloudinaryService;
use crate::config::ServiceConfig;
use crate::errors::{CloudinaryError, Result};
use crate::interfaces::{HttpTransport, Transport};

/// Build the client described by `args` and run its command
///
/// # Errors
///
/// Returns configuration, transport, remote or local IO errors.
pub fn run_app(args: &Args) -> Result<()> {
    let service = CloudinaryService::with_transport(service_config(args)?, HttpTransport::new());
    run_command(&service, &args.command)
}

/// Configuration from the connection URI and the global flags
///
/// # Errors
///
/// Returns a configuration error for a missing or invalid URI or keep pattern.
pub fn service_config(args: &Args) -> Result<ServiceConfig> {
    let uri = args
        .uri
        .as_deref()
        .ok_or_else(|| CloudinaryError::Config("no connection URI given".to_string()))?;

    let config = ServiceConfig::from_uri(uri)?
        .with_verbosity(args.verbose)
        .with_simulate(args.simulate);
    match &args.keep_files {
        Some(pattern) => config.with_keep_pattern(pattern),
        None => Ok(config),
    }
}

/// Dispatch one command to `service`, printing what the user asked for
///
/// # Errors
///
/// Propagates the error of the underlying client call.
pub fn run_command<T: Transport>(service: &CloudinaryService<T>, command: &Command) -> Result<()> {
    if let Some(line) = execute(service, command)? {
        println!("{line}");
    }
    Ok(())
}

/// Run one command and return the line to show the user, if any.
///
/// A single-file upload yields its access URL. A simulated upload with a
/// random id yields nothing, since no identifier exists yet.
///
/// # Errors
///
/// Propagates the error of the underlying client call.
pub fn execute<T: Transport>(
    service: &CloudinaryService<T>,
    command: &Command,
) -> Result<Option<String>> {
    let line = match command {
        Command::Upload {
            path,
            prepend,
            random_public_id,
            resource_type,
        } => {
            let public_id = service.upload(path, None, prepend, *random_public_id, *resource_type)?;
            let unnamed = *random_public_id && service.config().simulate;
            (!path.is_dir() && !unnamed).then(|| service.url(&public_id, *resource_type))
        }
        Command::Delete {
            public_id,
            prepend,
            resource_type,
        } => {
            service.delete(public_id, prepend, *resource_type)?;
            None
        }
        Command::Rename {
            from,
            to,
            prepend,
            resource_type,
        } => {
            service.rename(from, to, prepend, *resource_type)?;
            None
        }
        Command::Url {
            public_id,
            resource_type,
        } => Some(service.url(public_id, *resource_type)),
    };
    Ok(line)
}
