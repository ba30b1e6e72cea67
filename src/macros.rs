#[macro_export]
macro_rules! name {
    ($name:expr) => {
        fn name(&self) -> &str {
            $name
        }
    };
}

/// Implements [`LegacyHandler::call`](crate::LegacyHandler::call) from an async body.
#[macro_export]
macro_rules! legacy_call {
    (async fn call(& $self:ident, $req:ident : ThriftRequest<$args_ty:ty>, $res:ident : &mut ThriftResponse<$result_ty:ty>, $ctx:ident) { $($body:tt)* }) => {
        type Args = $args_ty;
        type Result = $result_ty;

        fn call<'call>(
            &'call $self,
            $req: $crate::ThriftRequest<$args_ty>,
            $res: &'call mut $crate::ThriftResponse<$result_ty>,
            $ctx: &'call $crate::CallContext,
        ) -> $crate::BoxFuture<
            'call,
            ::std::result::Result<
                ::std::option::Option<$crate::Success<$result_ty>>,
                $crate::BoxError,
            >,
        > {
            ::std::boxed::Box::pin(async move { $($body)* })
        }
    };
}

/// Implements [`ModernHandler::call`](crate::ModernHandler::call) from an async body.
#[macro_export]
macro_rules! modern_call {
    (async fn call(& $self:ident, $req:ident : Request<$args_ty:ty>) -> $result_ty:ty { $($body:tt)* }) => {
        type Args = $args_ty;
        type Result = $result_ty;

        fn call<'call>(
            &'call $self,
            $req: $crate::Request<$args_ty>,
        ) -> $crate::BoxFuture<
            'call,
            ::std::result::Result<$crate::Reply<$crate::Success<$result_ty>>, $crate::BoxError>,
        > {
            ::std::boxed::Box::pin(async move { $($body)* })
        }
    };
}
