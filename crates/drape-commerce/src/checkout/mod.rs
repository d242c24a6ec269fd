//! Checkout module.
//!
//! Contains the checkout flow, addresses, payment choices, orders and the
//! service that places them.

mod address;
mod flow;
mod order;
mod payment;
mod service;
mod session;

pub use address::Address;
pub use flow::{CheckoutFlow, CheckoutStep, ContactDetails};
pub use order::{Order, OrderLine, OrderRequest, OrderStatus};
pub use payment::{CardDetails, PaymentDetails, PaymentMethod};
pub use service::{CheckoutService, OrderService, SimulatedOrderService};
pub use session::{SessionProvider, StaticSession, UserProfile};
