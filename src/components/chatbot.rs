use web_sys::{HtmlTextAreaElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;

use crate::api::chatbot::{self, ChatMessage};
use crate::components::chat_message::ChatBubble;
use crate::components::scroll_lock::set_body_scroll_locked;

pub enum ChatbotMsg {
    Toggle,
    Close,
    SetInput(String),
    Send,
    Answered(ChatMessage),
}

/// Floating assistant: a round toggle button and, when open, the chat card.
pub struct ChatbotPopover {
    open: bool,
    greeted: bool,
    input: String,
    loading: bool,
    messages: Vec<ChatMessage>,
    messages_end: NodeRef,
}

impl Component for ChatbotPopover {
    type Message = ChatbotMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            open: false,
            greeted: false,
            input: String::new(),
            loading: false,
            messages: Vec::new(),
            messages_end: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatbotMsg::Toggle => {
                self.open = !self.open;
                // Greet once per page session, not on every open.
                if self.open && !self.greeted {
                    self.messages.push(ChatMessage::welcome());
                    self.greeted = true;
                }
                set_body_scroll_locked(self.open);
                true
            }
            ChatbotMsg::Close => {
                self.open = false;
                set_body_scroll_locked(false);
                true
            }
            ChatbotMsg::SetInput(value) => {
                self.input = value;
                true
            }
            ChatbotMsg::Send => {
                let question = self.input.trim().to_string();
                if question.is_empty() || self.loading {
                    return false;
                }
                self.messages.push(ChatMessage::user(question.clone()));
                self.input.clear();
                self.loading = true;
                ctx.link().send_future(async move {
                    ChatbotMsg::Answered(ChatMessage::reply(chatbot::ask(&question).await))
                });
                true
            }
            ChatbotMsg::Answered(message) => {
                log::debug!("Answer confidence {:?}, topic {:?}", message.confidence, message.topic);
                self.messages.push(message);
                self.loading = false;
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(end) = self.messages_end.cast::<web_sys::Element>() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.open {
            set_body_scroll_locked(false);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let toggle = ctx.link().callback(|_| ChatbotMsg::Toggle);
        let send_disabled = self.input.trim().is_empty() || self.loading;

        html! {
            <>
                <button class="chatbot-toggle" onclick={toggle} aria-label="Open assistant">
                    { if self.open { "✕" } else { "🤖" } }
                </button>

                if self.open {
                    <div class="chatbot-popover">
                        <div class="chatbot-header">
                            <div class="chatbot-title">
                                <h3>{"CareLoop AI"}</h3>
                                <p>{"Always here to help"}</p>
                            </div>
                            <button class="chatbot-close" onclick={ctx.link().callback(|_| ChatbotMsg::Close)}>
                                {"✕"}
                            </button>
                        </div>

                        <div class="chatbot-messages">
                            { for self.messages.iter().enumerate().map(|(idx, message)| html! {
                                <ChatBubble key={idx} message={message.clone()} />
                            }) }
                            if self.loading {
                                <div class="chat-row">
                                    <div class="chat-avatar bot">{"🤖"}</div>
                                    <div class="chat-bubble bot"><span class="loading-spinner"></span></div>
                                </div>
                            }
                            <div ref={self.messages_end.clone()}></div>
                        </div>

                        <div class="chatbot-input">
                            <textarea
                                rows="1"
                                placeholder="Type your question..."
                                value={self.input.clone()}
                                disabled={self.loading}
                                oninput={ctx.link().callback(|e: InputEvent| {
                                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                                    ChatbotMsg::SetInput(input.value())
                                })}
                                onkeydown={ctx.link().batch_callback(|e: KeyboardEvent| {
                                    if e.key() == "Enter" && !e.shift_key() {
                                        e.prevent_default();
                                        Some(ChatbotMsg::Send)
                                    } else {
                                        None
                                    }
                                })}
                            />
                            <button
                                class="chatbot-send"
                                disabled={send_disabled}
                                onclick={ctx.link().callback(|_| ChatbotMsg::Send)}
                            >
                                {"➤"}
                            </button>
                        </div>
                        <p class="chatbot-footnote">{"Powered by AI • Responses may vary"}</p>
                    </div>
                }

                <style>
                    {r#"
                    .chatbot-toggle {
                        position: fixed;
                        bottom: 1rem;
                        right: 5rem;
                        z-index: 50;
                        width: 3rem;
                        height: 3rem;
                        border: none;
                        border-radius: 50%;
                        background: linear-gradient(to bottom, #00B6C7, #F9D000);
                        color: #fff;
                        font-size: 1.4rem;
                        cursor: pointer;
                        transition: transform 0.3s ease;
                    }
                    .chatbot-toggle:hover { transform: scale(1.1) rotate(10deg); }
                    .chatbot-popover {
                        position: fixed;
                        bottom: 5rem;
                        right: 5rem;
                        z-index: 50;
                        width: 380px;
                        height: 500px;
                        display: flex;
                        flex-direction: column;
                        background: linear-gradient(to bottom right, #f9fafb, #f3f4f6);
                        border-radius: 1.5rem;
                        overflow: hidden;
                        box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25);
                    }
                    .chatbot-header {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        padding: 1.25rem;
                        background: linear-gradient(to right, #005C9E, #F9D000);
                    }
                    .chatbot-title h3 { margin: 0; color: #F9D000; font-size: 1.1rem; }
                    .chatbot-title p { margin: 0; color: #e0e7ff; font-size: 0.75rem; }
                    .chatbot-close { background: none; border: none; color: rgba(255,255,255,0.8); cursor: pointer; }
                    .chatbot-messages { flex: 1; overflow-y: auto; padding: 1.25rem; scrollbar-width: none; }
                    .chat-row { display: flex; gap: 0.75rem; margin-bottom: 1rem; }
                    .chat-row.from-user { flex-direction: row-reverse; }
                    .chat-avatar { width: 2rem; height: 2rem; flex-shrink: 0; border-radius: 50%; display: flex; align-items: center; justify-content: center; }
                    .chat-avatar.bot { background: linear-gradient(to bottom right, #6366f1, #d946ef); }
                    .chat-avatar.user { background: linear-gradient(to bottom right, #F9D000, #eab308); }
                    .chat-bubble { max-width: 75%; padding: 0.75rem 1rem; border-radius: 1rem; font-size: 0.875rem; line-height: 1.6; }
                    .chat-bubble p { margin: 0; }
                    .chat-topic { display: inline-block; margin-top: 0.4rem; font-size: 0.65rem; color: #6366f1; text-transform: uppercase; letter-spacing: 0.05em; }
                    .chat-bubble.bot { background: #fff; color: #1f2937; border: 1px solid #e5e7eb; border-top-left-radius: 0; }
                    .chat-bubble.user { background: linear-gradient(to right, #4f46e5, #d946ef); color: #fff; border-top-right-radius: 0; }
                    .typing-caret { display: inline-block; margin-left: 0.25rem; animation: caretBlink 0.8s infinite; }
                    @keyframes caretBlink { 0%, 100% { opacity: 1; } 50% { opacity: 0; } }
                    .chatbot-input { display: flex; gap: 0.5rem; align-items: flex-end; padding: 1rem 1rem 0; background: #fff; border-top: 1px solid #e5e7eb; }
                    .chatbot-input textarea { flex: 1; resize: none; max-height: 80px; background: #e5e7eb; border: 2px solid transparent; border-radius: 1rem; padding: 0.5rem 0.75rem; font-size: 0.875rem; }
                    .chatbot-input textarea:focus { border-color: #818cf8; outline: none; }
                    .chatbot-send { border: none; border-radius: 0.75rem; padding: 0.5rem 0.8rem; color: #fff; background: linear-gradient(to right, #005C9E, #F9D000); cursor: pointer; }
                    .chatbot-send:disabled { opacity: 0.5; cursor: not-allowed; }
                    .chatbot-footnote { margin: 0; padding: 0.5rem 0 0.75rem; background: #fff; text-align: center; font-size: 10px; color: #9ca3af; }
                    @media (max-width: 768px) {
                        .chatbot-toggle { right: 1.5rem; }
                        .chatbot-popover { right: 1.5rem; width: calc(100vw - 3rem); }
                    }
                    "#}
                </style>
            </>
        }
    }
}
