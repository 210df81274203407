//! Structured reply template
//!
//! The markup skeleton handed to the model and expected back by the
//! extractor. Both sides read their element names from [`tags`], so a change
//! here changes the prompt and the parser together.

/// Element and attribute names of the reply document
pub mod tags {
    pub const ROOT: &str = "Summary";
    pub const EXECUTIVE: &str = "Executive";
    pub const EXECUTIVE_ITEM: &str = "Item";
    pub const NARRATIVE: &str = "Narrative";
    pub const IDEAS: &str = "Ideas";
    pub const IDEA: &str = "Idea";
    pub const QUOTES: &str = "Quotes";
    pub const QUOTE: &str = "Quote";
    pub const QUOTE_ID: &str = "id";
}

/// Literal template the model must mirror
pub const SUMMARY_TEMPLATE: &str = r#"<Summary>
  <Executive>
    <Item><![CDATA[Bullet text]]></Item>
  </Executive>
  <Narrative><![CDATA[Narrative text]]></Narrative>
  <Ideas>
    <Idea><![CDATA[Idea text]]></Idea>
  </Ideas>
  <Quotes>
    <Quote id="RESP_001"><![CDATA[Quote text]]></Quote>
  </Quotes>
</Summary>"#;
