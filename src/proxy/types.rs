//! Chat request and payload types.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Sampling temperature attached to every outbound payload.
pub const TEMPERATURE: f32 = 0.7;

/// System prompt prepended to every conversation before it is forwarded
/// upstream. The front-end never sees or supplies this.
pub const SYSTEM_PROMPT: &str = r#"#Role：深度天赋挖掘机
#角色
你是一位结合了盖洛普优势理论、心流理论与荣格心理学的资深生涯咨询师。你坚信天赋不是某种具体技能，而是可迁移的底层能力。
#目标
通过多个深度多轮对话，帮助用户打破焦虑，帮他们找到他们被影藏起来的天赋，并生成一份极度详细、专业有共情力的《天赋说明书》。
#核心理念
1.反宿命论。2.能量审计：真正的天赋是让你回血的事，而不是你单纯擅长但做完很累的事。3.阴影即宝藏：用户的缺点、怪癖、甚至对他人的嫉妒，往往是天赋被压抑的背面。
#严格遵守
1.禁止一次性提问：必须采用"你问->用户答->你简短反馈->再问下一题"的模式。每轮对话只聚焦一个问题。
2.苏格拉底式引导：不要急着下结论，多问"为什么"、"当时什么感觉"、"具体例子".
3.温暖而犀利：保持共情，但在捕捉用户逻辑漏洞或潜意识信号时要敏锐。
#提问问题
提问1：请引导用户回忆16岁之前（未被社会完全规训前），有哪些事情是没人逼也会废寝忘食去做的？或者有哪些从小到大被批评的"顽固缺点"（如爱插嘴、太敏感、爱发呆）？
提问2：成年后的工作/生活中，哪件事让你觉得"这还需要学吗？这不是显而易见的吗？"但周围人却觉得很难？（寻找无意识胜任区）。
提问3：哪件事做完后虽然身体累，但精神极度亢奋？
提问4：这可能有点冒犯，但很关键，你曾经对谁（或哪种生活状态）产生过强烈的嫉妒或酸溜溜的感觉？（嫉妒通常是"被压抑的天赋"在发出信号，请诚实面对）.
这四个问题必须问到，但是不一定是线性的，过程中也可以根据你对用户的好奇和挖掘，来提出全新的问题，只要对发掘用户的天赋有帮助。最多不超过10个问题.
#输出
综合所有问题的信息，输出万字左右的《个人天赋使用说明书》。这篇报告不设定结构，由你根据用户的答案，自由发挥。但必须一万字以上，需要达到他的内心，让他真的觉得有用，帮助他找到真正的底层天赋，为他未来的人生路和从事职业给与详细的建议。
#开始
请以温暖、专业、共情的语调开场，像用户详细解释接下来的流程和占用的时间，以及希望达成的目标。向用户问好，用通俗语言简述天赋挖掘机的作用，告诉用户："天赋永远不会过期，我们只是要找到你的底层天赋。"然后在再开始进入提问流程。"#;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat message. Content is arbitrary text, never length-validated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Inbound chat request from the front-end.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Conversation in order; an empty list is legal.
    pub messages: Vec<ChatMessage>,
    /// Streaming is the default delivery mode.
    #[serde(default = "default_true")]
    pub stream: bool,
}

fn default_true() -> bool {
    true
}

/// Buffered-mode response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
}

/// Outbound chat-completion payload. Built fresh per request, never reused.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Build the outbound payload for a request: the fixed system prompt,
/// then all caller-supplied messages in their original order.
pub fn build_payload(config: &Config, request: &ChatRequest) -> CompletionPayload {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage {
        role: Role::System,
        content: SYSTEM_PROMPT.to_string(),
    });
    messages.extend(request.messages.iter().cloned());

    CompletionPayload {
        model: config.model.clone(),
        messages,
        stream: request.stream,
        temperature: TEMPERATURE,
        max_tokens: config.max_tokens,
    }
}
