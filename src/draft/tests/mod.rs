mod extension_tests;
mod patcher_tests;
