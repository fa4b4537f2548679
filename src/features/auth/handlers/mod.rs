pub mod auth_handler;

pub use auth_handler::{
    __path_check_access, __path_get_me, __path_get_menu, __path_login, __path_logout,
    check_access, get_me, get_menu, login, logout,
};
