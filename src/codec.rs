use crate::error::CodecError;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, marker::PhantomData};

/// Binds a container type to the wire encoding.
pub struct ThriftSerializer<T> {
    _container: PhantomData<fn() -> T>,
}

impl<T> ThriftSerializer<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self {
            _container: PhantomData,
        }
    }

    pub fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(value)?)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl<T> Default for ThriftSerializer<T>
where
    T: Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ThriftSerializer<T> {
    fn clone(&self) -> Self {
        Self {
            _container: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ThriftSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ThriftSerializer<{}>", std::any::type_name::<T>())
    }
}
