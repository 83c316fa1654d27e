//! Interaction payloads and responses of the chat platform

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// Ephemeral message flag
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
	Ping,
	ApplicationCommand,
	MessageComponent,
	Autocomplete,
	ModalSubmit,
	Other(u8),
}

impl From<u8> for InteractionType {
	fn from(v: u8) -> Self {
		match v {
			1 => InteractionType::Ping,
			2 => InteractionType::ApplicationCommand,
			3 => InteractionType::MessageComponent,
			4 => InteractionType::Autocomplete,
			5 => InteractionType::ModalSubmit,
			v => InteractionType::Other(v),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
	pub id: UserId,
	#[serde(default)]
	pub username: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Member {
	pub user: User,
}

/// A text input inside a submitted modal
#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedField {
	pub custom_id: String,
	#[serde(default)]
	pub value: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmittedRow {
	#[serde(default)]
	pub components: Vec<SubmittedField>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InteractionData {
	#[serde(default)]
	pub custom_id: Option<String>,
	/// Selected select-menu values
	#[serde(default)]
	pub values: Vec<String>,
	/// Modal rows
	#[serde(default)]
	pub components: Vec<SubmittedRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Interaction {
	#[serde(rename = "type")]
	pub kind: InteractionType,
	#[serde(default)]
	pub data: Option<InteractionData>,
	/// Set for interactions inside a guild
	#[serde(default)]
	pub member: Option<Member>,
	/// Set for interactions in direct messages
	#[serde(default)]
	pub user: Option<User>,
}

impl Interaction {
	pub fn invoker(&self) -> Option<&User> {
		self.member.as_ref().map(|m| &m.user).or(self.user.as_ref())
	}

	pub fn custom_id(&self) -> Option<&str> {
		self.data.as_ref()?.custom_id.as_deref()
	}

	pub fn first_value(&self) -> Option<&str> {
		self.data.as_ref()?.values.first().map(String::as_str)
	}

	/// Value of a modal text input
	pub fn field(&self, custom_id: &str) -> Option<&str> {
		self.data
			.as_ref()?
			.components
			.iter()
			.flat_map(|row| &row.components)
			.find(|field| field.custom_id == custom_id)
			.and_then(|field| field.value.as_deref())
	}
}

// Responses
//***********

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ResponseType {
	Pong,
	/// Post a new message
	ChannelMessage,
	/// Edit the message the component belongs to
	UpdateMessage,
	Modal,
}

impl From<ResponseType> for u8 {
	fn from(typ: ResponseType) -> u8 {
		match typ {
			ResponseType::Pong => 1,
			ResponseType::ChannelMessage => 4,
			ResponseType::UpdateMessage => 7,
			ResponseType::Modal => 9,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ComponentType {
	ActionRow,
	Button,
	StringSelect,
	TextInput,
}

impl From<ComponentType> for u8 {
	fn from(typ: ComponentType) -> u8 {
		match typ {
			ComponentType::ActionRow => 1,
			ComponentType::Button => 2,
			ComponentType::StringSelect => 3,
			ComponentType::TextInput => 4,
		}
	}
}

pub mod style {
	pub const PRIMARY: u8 = 1;
	pub const SUCCESS: u8 = 3;
	pub const DANGER: u8 = 4;
	pub const TEXT_PARAGRAPH: u8 = 2;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
	pub label: String,
	pub value: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Component {
	#[serde(rename = "type")]
	pub kind: ComponentType,
	pub custom_id: Option<String>,
	pub label: Option<String>,
	pub style: Option<u8>,
	pub placeholder: Option<String>,
	pub options: Option<Vec<SelectOption>>,
	pub min_length: Option<u16>,
	pub max_length: Option<u16>,
	pub required: Option<bool>,
	pub components: Option<Vec<Component>>,
}

impl Component {
	fn new(kind: ComponentType) -> Self {
		Self {
			kind,
			custom_id: None,
			label: None,
			style: None,
			placeholder: None,
			options: None,
			min_length: None,
			max_length: None,
			required: None,
			components: None,
		}
	}

	pub fn action_row(children: Vec<Component>) -> Self {
		Self { components: Some(children), ..Self::new(ComponentType::ActionRow) }
	}

	pub fn button(custom_id: impl Into<String>, label: impl Into<String>, style: u8) -> Self {
		Self {
			custom_id: Some(custom_id.into()),
			label: Some(label.into()),
			style: Some(style),
			..Self::new(ComponentType::Button)
		}
	}

	pub fn select(
		custom_id: impl Into<String>,
		placeholder: impl Into<String>,
		options: Vec<SelectOption>,
	) -> Self {
		Self {
			custom_id: Some(custom_id.into()),
			placeholder: Some(placeholder.into()),
			options: Some(options),
			..Self::new(ComponentType::StringSelect)
		}
	}

	pub fn paragraph(custom_id: impl Into<String>, label: impl Into<String>, max_length: u16) -> Self {
		Self {
			custom_id: Some(custom_id.into()),
			label: Some(label.into()),
			style: Some(style::TEXT_PARAGRAPH),
			min_length: Some(1),
			max_length: Some(max_length),
			required: Some(true),
			..Self::new(ComponentType::TextInput)
		}
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResponseData {
	pub content: Option<String>,
	/// `Some(vec![])` removes every component from the edited message
	pub components: Option<Vec<Component>>,
	pub title: Option<String>,
	pub custom_id: Option<String>,
	pub flags: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
	#[serde(rename = "type")]
	pub kind: ResponseType,
	pub data: Option<ResponseData>,
}

impl InteractionResponse {
	pub fn pong() -> Self {
		Self { kind: ResponseType::Pong, data: None }
	}

	/// New ephemeral message visible only to the invoking admin
	pub fn message(content: impl Into<String>) -> Self {
		Self {
			kind: ResponseType::ChannelMessage,
			data: Some(ResponseData {
				content: Some(content.into()),
				flags: Some(FLAG_EPHEMERAL),
				..ResponseData::default()
			}),
		}
	}

	/// Edit of the originating message, replacing its controls with `components`
	pub fn update_with(content: impl Into<String>, components: Vec<Component>) -> Self {
		Self {
			kind: ResponseType::UpdateMessage,
			data: Some(ResponseData {
				content: Some(content.into()),
				components: Some(components),
				..ResponseData::default()
			}),
		}
	}

	/// Terminal edit of the originating message, removing its controls
	pub fn update_final(content: impl Into<String>) -> Self {
		Self {
			kind: ResponseType::UpdateMessage,
			data: Some(ResponseData {
				content: Some(content.into()),
				components: Some(Vec::new()),
				..ResponseData::default()
			}),
		}
	}

	pub fn modal(
		custom_id: impl Into<String>,
		title: impl Into<String>,
		components: Vec<Component>,
	) -> Self {
		Self {
			kind: ResponseType::Modal,
			data: Some(ResponseData {
				custom_id: Some(custom_id.into()),
				title: Some(title.into()),
				components: Some(components),
				..ResponseData::default()
			}),
		}
	}

	pub fn content(&self) -> Option<&str> {
		self.data.as_ref()?.content.as_deref()
	}

	/// True if the response strips all controls from the message it edits
	pub fn clears_components(&self) -> bool {
		self.kind == ResponseType::UpdateMessage
			&& self.data.as_ref().and_then(|d| d.components.as_ref()).is_some_and(Vec::is_empty)
	}
}


// vim: ts=4
