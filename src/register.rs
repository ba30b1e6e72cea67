use crate::{
    calling::{CallContext, Handler, Strategy},
    codec::ThriftSerializer,
    dispatcher::Dispatcher,
    error::RegisterError,
    types::{ResultUnion, ThriftArgs, ThriftModule},
};

/// Registers a Thrift service method with `dispatcher`.
///
/// The endpoint is named `"{service}::{method}"`. `service` defaults to the trailing
/// segment of the module path and `method` to the handler's name. The method must be
/// declared by `module` and must not be one-way, and the handler must be written for
/// the dispatcher's calling convention.
///
/// Returns the endpoint name.
///
/// ```ignore
/// // service HelloWorld { string hello(1: string name) }
/// let mut dispatcher = Dispatcher::default();
/// thriftquickly::register(&mut dispatcher, &HelloWorld, Handler::legacy(Hello), None, None)?;
/// assert!(dispatcher.endpoints().any(|e| e == "HelloWorld::hello"));
/// ```
pub fn register<M, A, R>(
    dispatcher: &mut Dispatcher,
    module: &M,
    handler: Handler<A, R>,
    method: Option<&str>,
    service: Option<&str>,
) -> Result<String, RegisterError>
where
    M: ThriftModule,
    A: ThriftArgs,
    R: ResultUnion,
{
    let service = service
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| module.service_name());
    if service.is_empty() {
        return Err(RegisterError::MissingService);
    }
    let method = method
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| handler.name())
        .to_owned();
    if method.is_empty() {
        return Err(RegisterError::MissingMethod);
    }

    let spec = module
        .method(&method)
        .ok_or_else(|| RegisterError::UnknownMethod {
            service: service.to_owned(),
            method: method.clone(),
        })?;
    let endpoint = format!("{service}::{method}");
    let Some(result) = spec.result else {
        return Err(RegisterError::Oneway { endpoint });
    };
    check_shape(spec.args, A::NAME)?;
    check_shape(result, R::NAME)?;

    let context = CallContext::new(service, endpoint.clone());
    let strategy = Strategy::select(dispatcher.convention(), handler, context)?;
    dispatcher.register(
        endpoint.clone(),
        strategy,
        ThriftSerializer::new(),
        ThriftSerializer::new(),
    );
    Ok(endpoint)
}

fn check_shape(expected: &'static str, found: &'static str) -> Result<(), RegisterError> {
    if expected == found {
        Ok(())
    } else {
        Err(RegisterError::ShapeMismatch { expected, found })
    }
}
