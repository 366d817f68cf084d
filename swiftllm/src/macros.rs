/// Creates a single chat [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use swiftllm::{Role, sw_msg};
///
/// let message = sw_msg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.content, "Done.");
/// ```
#[macro_export]
macro_rules! sw_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<Message>` from role/content pairs.
///
/// ```rust
/// use swiftllm::{Role, sw_messages};
///
/// let messages = sw_messages![
///     system => "Find all the names in the text.",
///     user => "Zachary Ivie is a data scientist.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].role, Role::User);
/// ```
#[macro_export]
macro_rules! sw_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::sw_msg!($role => $content)),+]
    };
}

/// Builds a [`Schema`](crate::Schema) keeping field declaration order.
///
/// ```rust
/// use swiftllm::sw_schema;
///
/// let schema = sw_schema! { name: "str", age: "int", title: "str" };
/// assert_eq!(schema.to_json(), r#"{"name":"str","age":"int","title":"str"}"#);
/// ```
#[macro_export]
macro_rules! sw_schema {
    () => {
        $crate::Schema::new()
    };
    ($($field:ident : $type_name:expr),+ $(,)?) => {
        $crate::Schema::new()$(.field(stringify!($field), $type_name))+
    };
}
