pub mod key_name_to_vk_code;
pub mod vk_code_to_keysym;

pub use key_name_to_vk_code::KeyNameToVkCode;
pub use vk_code_to_keysym::VkCodeToKeysym;
