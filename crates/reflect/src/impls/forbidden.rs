//! Handles whose internals are never safe to traverse.
//!
//! These expose no members and only carry trait flags; renderers refuse to
//! look inside them.

use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc;
use std::{thread, vec};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::{Inspect, Reflect, Shape, TypeDesc, TypeTraits};

macro_rules! forbidden {
	($(<$($param:ident),*> $ty:ty => $name:literal in $namespace:literal, $traits:expr;)*) => {$(
		impl<$($param: 'static),*> Reflect for $ty {
			fn reflect_type() -> TypeDesc {
				TypeDesc::interned::<Self>(|| {
					TypeDesc::of::<Self>($name)
						.namespace($namespace)
						.traits($traits)
						.build()
				})
			}
		}

		impl<$($param: 'static),*> Inspect for $ty {
			static_type_desc!();

			fn shape(&self) -> Shape<'_> {
				Shape::Object
			}
		}
	)*};
}

forbidden! {
	<T> thread::JoinHandle<T> => "JoinHandle" in "std::thread", TypeTraits::THREAD;
	<> thread::Thread => "Thread" in "std::thread", TypeTraits::THREAD;
	<T> mpsc::Sender<T> => "Sender" in "std::sync::mpsc", TypeTraits::COMPLETION;
	<T> mpsc::SyncSender<T> => "SyncSender" in "std::sync::mpsc", TypeTraits::COMPLETION;
	<T> mpsc::Receiver<T> => "Receiver" in "std::sync::mpsc", TypeTraits::COMPLETION;
	<T> vec::IntoIter<T> => "IntoIter" in "alloc::vec", TypeTraits::ITERATOR;
	<T> Pin<Box<dyn Future<Output = T> + Send>> => "Pin" in "core::pin", TypeTraits::FUTURE;
	<T> tokio::task::JoinHandle<T> => "JoinHandle" in "tokio::task", TypeTraits::COMPLETION;
	<T> oneshot::Receiver<T> => "Receiver" in "tokio::sync::oneshot", TypeTraits::COMPLETION;
	<> CancellationToken => "CancellationToken" in "tokio_util::sync", TypeTraits::CANCELLATION;
}
