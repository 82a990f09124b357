use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::resolve::{ResolveError, Result, Value};

type Waiter = Box<dyn FnOnce(&Pending)>;
type Continuation = Box<dyn FnOnce(&Value)>;

enum Settlement {
	Waiting,
	Fulfilled(Value),
	Rejected(String),
}

struct PendingState {
	settlement: Settlement,
	waiter: Option<Waiter>,
	continuations: VecDeque<Continuation>,
	draining: bool,
}

/// Computation that settles exactly once, either fulfilled with a value or rejected.
///
/// Cloning yields another handle to the same computation. Continuations registered
/// with [`Pending::then`] fire in registration order once the computation is
/// fulfilled; `wait` drives settlement through the optional waiter.
#[derive(Clone)]
pub struct Pending {
	state: Rc<RefCell<PendingState>>,
}

impl Pending {
	/// Create an unsettled computation with no waiter.
	pub fn new() -> Self {
		Self::from_parts(Settlement::Waiting, None)
	}

	/// Create an unsettled computation; `waiter` runs on the first `wait` and should settle it.
	pub fn with_waiter(waiter: impl FnOnce(&Pending) + 'static) -> Self {
		Self::from_parts(Settlement::Waiting, Some(Box::new(waiter)))
	}

	/// Create an already fulfilled computation.
	pub fn fulfilled(value: impl Into<Value>) -> Self {
		Self::from_parts(Settlement::Fulfilled(value.into()), None)
	}

	fn from_parts(settlement: Settlement, waiter: Option<Waiter>) -> Self {
		Self {
			state: Rc::new(RefCell::new(PendingState {
				settlement,
				waiter,
				continuations: VecDeque::new(),
				draining: false,
			})),
		}
	}

	/// Whether the computation has been fulfilled or rejected.
	pub fn is_settled(&self) -> bool {
		!matches!(self.state.borrow().settlement, Settlement::Waiting)
	}

	/// Whether the computation has been rejected.
	pub fn is_rejected(&self) -> bool {
		matches!(self.state.borrow().settlement, Settlement::Rejected(_))
	}

	/// Whether both handles refer to the same computation.
	pub fn ptr_eq(&self, other: &Pending) -> bool {
		Rc::ptr_eq(&self.state, &other.state)
	}

	/// Fulfill the computation and run queued continuations in order.
	pub fn fulfill(&self, value: impl Into<Value>) -> Result<()> {
		self.settle(Settlement::Fulfilled(value.into()))
	}

	/// Reject the computation; queued continuations are dropped.
	pub fn reject(&self, reason: impl Into<String>) -> Result<()> {
		self.settle(Settlement::Rejected(reason.into()))
	}

	fn settle(&self, settlement: Settlement) -> Result<()> {
		{
			let mut state = self.state.borrow_mut();
			if !matches!(state.settlement, Settlement::Waiting) {
				return Err(ResolveError::AlreadySettled);
			}
			state.settlement = settlement;
			state.waiter = None;
		}

		self.drain();
		Ok(())
	}

	/// Register `continuation` to run with the fulfilled value.
	///
	/// Runs immediately when already fulfilled, unless continuations are currently being
	/// drained, in which case it is queued behind them. Never runs after a rejection.
	pub fn then(&self, continuation: impl FnOnce(&Value) + 'static) {
		let ready = {
			let mut guard = self.state.borrow_mut();
			let state = &mut *guard;
			match &state.settlement {
				Settlement::Fulfilled(value) if !state.draining => value.clone(),
				Settlement::Rejected(_) => {
					debug!("dropping continuation registered on rejected computation");
					return;
				}
				_ => {
					state.continuations.push_back(Box::new(continuation));
					return;
				}
			}
		};

		continuation(&ready);
	}

	/// Wait for settlement and return the fulfilled value.
	pub fn wait(&self) -> Result<Value> {
		let waiter = self.state.borrow_mut().waiter.take();
		if let Some(waiter) = waiter
			&& !self.is_settled()
		{
			trace!("invoking waiter for pending computation");
			waiter(self);
		}

		match &self.state.borrow().settlement {
			Settlement::Fulfilled(value) => Ok(value.clone()),
			Settlement::Rejected(reason) => Err(ResolveError::Rejected { reason: reason.clone() }),
			Settlement::Waiting => Err(ResolveError::NeverSettled),
		}
	}

	fn drain(&self) {
		{
			let mut state = self.state.borrow_mut();
			if state.draining {
				return;
			}
			state.draining = true;
		}

		loop {
			let next = {
				let mut guard = self.state.borrow_mut();
				let state = &mut *guard;
				match &state.settlement {
					Settlement::Fulfilled(value) => state.continuations.pop_front().map(|continuation| (continuation, value.clone())),
					Settlement::Rejected(reason) => {
						if !state.continuations.is_empty() {
							debug!("rejected ({reason}); dropping {} continuation(s)", state.continuations.len());
						}
						state.continuations.clear();
						None
					}
					Settlement::Waiting => None,
				}
			};

			let Some((continuation, value)) = next else {
				break;
			};
			continuation(&value);
		}

		self.state.borrow_mut().draining = false;
	}
}

impl Default for Pending {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Pending {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Ok(state) = self.state.try_borrow() else {
			return f.write_str("Pending { <borrowed> }");
		};
		let status = match &state.settlement {
			Settlement::Waiting => "waiting",
			Settlement::Fulfilled(_) => "fulfilled",
			Settlement::Rejected(_) => "rejected",
		};
		f.debug_struct("Pending")
			.field("status", &status)
			.field("continuations", &state.continuations.len())
			.finish()
	}
}
