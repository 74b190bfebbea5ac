use yew::prelude::*;

use crate::api::chatbot::ChatMessage;
use crate::typing::use_typing_effect;

#[derive(Properties, PartialEq)]
pub struct ChatBubbleProps {
    pub message: ChatMessage,
}

#[function_component(ChatBubble)]
pub fn chat_bubble(props: &ChatBubbleProps) -> Html {
    let message = &props.message;
    let typing = use_typing_effect(
        AttrValue::from(message.text.clone()),
        message.is_bot && message.animate,
    );

    let row_class = classes!("chat-row", (!message.is_bot).then(|| "from-user"));
    let bubble_class = if message.is_bot { "chat-bubble bot" } else { "chat-bubble user" };

    html! {
        <div class={row_class}>
            <div class={classes!("chat-avatar", if message.is_bot { "bot" } else { "user" })}>
                { if message.is_bot { "🤖" } else { "🙂" } }
            </div>
            <div class={bubble_class}>
                <p>
                    { typing.visible_text().to_string() }
                    if message.is_bot && !typing.is_complete() {
                        <span class="typing-caret">{"|"}</span>
                    }
                </p>
                if let Some(topic) = message.topic.as_ref().filter(|_| typing.is_complete()) {
                    <span class="chat-topic">{topic.clone()}</span>
                }
            </div>
        </div>
    }
}
