//! Validated entry points over movable services.

mod child;
mod mapper;
mod parent;

pub use child::{ChildAssociation, ChildFacade, ChildSource};
pub use mapper::{IdentityMapper, Mapper};
pub use parent::ParentFacade;
