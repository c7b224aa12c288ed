// handlers/mod.rs - three security tiers
//
// public:    no authentication (/auth/*)
// protected: JWT authentication (/todos, /users)
// elevated:  admin gate + JWT authentication (/admin/*)

pub mod elevated;
pub mod protected;
pub mod public;
