pub mod friend;
pub mod repeat;
pub mod stats;
pub mod task;
pub mod user;

pub use friend::{AddFriendRequest, FriendRequest, FriendSummary};
pub use repeat::{Cadence, RepeatRule, RepeatUnit};
pub use stats::Stats;
pub use task::{
    Collaborator, CompleteTaskResponse, Difficulty, NewTaskRequest, Permission, Subtask,
    SubtaskUpdateRequest, Task, TaskRow, UpdateTaskRequest,
};
pub use user::{
    EquipRequest, NewUserRequest, PresenceRequest, PurchaseItemRequest, PurchaseTierRequest,
    UserProfile, UserRow,
};
