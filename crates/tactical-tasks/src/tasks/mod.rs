//! Group maneuver tasks and the leader/follower order tasks.

mod ambush;
mod attack;
mod charge;
mod flank;
mod follow_orders;
mod grid;
mod hold;
mod leapfrog;
mod marching_fire;
mod reinforcements;
mod retreat;
mod shoot_and_scoot;
mod surround;

pub use ambush::{Ambush, AmbushConfig};
pub use attack::Attack;
pub use charge::{Charge, ChargeConfig};
pub use flank::{Flank, FlankConfig};
pub use follow_orders::FollowOrders;
pub use grid::GridSpec;
pub use hold::{Hold, HoldConfig};
pub use leapfrog::{Leapfrog, LeapfrogConfig};
pub use marching_fire::{MarchingFire, MarchingFireConfig};
pub use reinforcements::{ReinforcementsResponse, RequestReinforcements};
pub use retreat::{Retreat, RetreatConfig};
pub use shoot_and_scoot::{ShootAndScoot, ShootAndScootConfig};
pub use surround::{Surround, SurroundConfig};
