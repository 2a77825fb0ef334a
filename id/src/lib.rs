// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Typed identifiers for intents and the generators that hand them out.
//!
//! An [`Id<T>`] is a [`Uuid`] tagged at compile time with the type it identifies, so an intent id
//! can never be confused with the id of anything else. [`IdGenerator`] abstracts over the policy
//! used to produce fresh ids: [`RandomIds`] for normal operation and [`SequentialIds`] when ids
//! must be predictable (replay, tests).

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]

mod generator;

pub use generator::{IdGenerator, RandomIds, SequentialIds};

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

use core::fmt::{Debug, Formatter};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// A [UUID] tagged with the type `T` it identifies.
///
/// ```
/// # use sol_id::Id;
/// struct Intent;
/// struct Device;
///
/// let intent: Id<Intent> = Id::new();
/// let device: Id<Device> = Id::new();
/// assert_ne!(intent.into_raw(), device.into_raw());
/// ```
///
/// ```rust,compile_fail
/// # use sol_id::Id;
/// # struct Intent;
/// # struct Device;
/// fn mixup(mut intent: Id<Intent>, device: Id<Device>) {
///     intent = device;
/// }
/// ```
///
/// `T` may be unsized, which allows ids tagged with a trait object (`Id<dyn Intent>`).
///
/// [UUID]: https://en.wikipedia.org/wiki/Universally_unique_identifier
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent, bound = ""))]
#[repr(transparent)]
pub struct Id<T: ?Sized>(Uuid, #[cfg_attr(feature = "serde", serde(skip))] PhantomData<T>);

impl<T: ?Sized> Copy for Id<T> {}

impl<T: ?Sized> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: ?Sized> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: ?Sized> Eq for Id<T> {}

impl<T: ?Sized> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: ?Sized> AsRef<Uuid> for Id<T> {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl<T: ?Sized> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Display>::fmt(&self.0, f)
    }
}

impl<T: ?Sized> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Debug>::fmt(&self.0, f)
    }
}

impl<T: ?Sized> Id<T> {
    /// Namespace used for [UUIDv5] identifiers built with [`Id::new_static`].
    ///
    /// [UUIDv5]: https://datatracker.ietf.org/doc/html/rfc9562#section-5.5
    pub const NAMESPACE_UUID: Uuid = Uuid::from_u128(0x5d1c_7a0e_3b42_4f8e_9c61_0b2e_a4d7_1f35);

    /// Generate a new random (v4) `Id<T>`.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4(), PhantomData)
    }

    /// Strip type safety and return the wrapped [`Uuid`]
    #[must_use]
    pub const fn into_raw(self) -> Uuid {
        self.0
    }

    /// Return a reference to the wrapped [`Uuid`].
    #[must_use]
    pub const fn as_raw(&self) -> &Uuid {
        &self.0
    }

    /// Tag `uuid` with type `T`.
    ///
    /// Only use this when the [`Uuid`] is known to designate a `T`, typically when it was read back
    /// from a serialized record. Fresh ids come from [`Id::new`] or an [`IdGenerator`].
    #[must_use]
    pub const fn from_raw(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    /// Generate a [UUID version 5] from a namespace and a byte string.
    ///
    /// [UUID version 5]: https://datatracker.ietf.org/doc/html/rfc9562#section-5.5
    #[must_use]
    pub fn new_v5(namespace: Uuid, tag: impl AsRef<[u8]>) -> Self {
        Self(Uuid::new_v5(&namespace, tag.as_ref()), PhantomData)
    }

    /// Generate a stable v5 id from `tag` within [`Id::NAMESPACE_UUID`].
    #[must_use]
    pub fn new_static(tag: impl AsRef<str>) -> Self {
        Self::new_v5(Self::NAMESPACE_UUID, tag.as_ref().as_bytes())
    }

    /// 64-bit fingerprint of this id: the two halves of the UUID folded together.
    ///
    /// Sequential ids keep their counter visible in the fingerprint as long as the block is zero.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let (hi, lo) = self.0.as_u64_pair();
        hi ^ lo
    }
}

impl<T: ?Sized> From<Id<T>> for Uuid {
    fn from(value: Id<T>) -> Self {
        value.0
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::Id;
    use bolero::{Driver, TypeGenerator, ValueGenerator};
    use std::marker::PhantomData;

    /// Produces arbitrary ids, including ones no generator would ever hand out.
    pub struct UuidIdGenerator;

    impl ValueGenerator for UuidIdGenerator {
        type Output = Id<()>;

        fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
            Some(Id(
                uuid::Builder::from_random_bytes(driver.produce::<[u8; 16]>()?).into_uuid(),
                PhantomData,
            ))
        }
    }

    impl<T: ?Sized + 'static> TypeGenerator for Id<T> {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(Id::from_raw(uuid::Uuid::from_bytes(
                driver.produce::<[u8; 16]>()?,
            )))
        }
    }
}
