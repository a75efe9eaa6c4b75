pub mod friend_service;
pub mod progression;
pub mod recurrence;
pub mod rewards;
pub mod scheduler;
pub mod shop_service;
pub mod streaks;
pub mod task_service;
pub mod user_service;

pub use friend_service::FriendService;
pub use progression::{Progress, progress_for, progress_for_balance};
pub use recurrence::{OCCURRENCE_COUNT, expand_occurrences};
pub use rewards::{Reward, reward_for};
pub use scheduler::StreakScheduler;
pub use shop_service::ShopService;
pub use task_service::TaskService;
pub use user_service::UserService;
