#![allow(dead_code)]
use ferrous_respfilter_domain::{BlockRule, RuleSet};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use ipnetwork::IpNetwork;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub struct RuleSetBuilder {
    rules: Vec<BlockRule>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn block(mut self, domain: &str, cidrs: &[&str]) -> Self {
        let blocks: Vec<IpNetwork> = cidrs.iter().map(|c| c.parse().unwrap()).collect();
        self.rules.push(BlockRule::new(domain, blocks).unwrap());
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet::new(self.rules)
    }
}

fn name(domain: &str) -> Name {
    Name::from_str(domain).unwrap()
}

/// Builds requests and matching upstream responses.
pub struct MessageFixture {
    request: Message,
    answers: Vec<Record>,
}

impl MessageFixture {
    pub fn query(id: u16, domain: &str, record_type: RecordType) -> Self {
        let mut request = Message::new(id, MessageType::Query, OpCode::Query);
        request.set_recursion_desired(true);
        request.add_query(Query::query(name(domain), record_type));
        Self {
            request,
            answers: Vec::new(),
        }
    }

    pub fn a(mut self, owner: &str, addr: &str) -> Self {
        let ip: Ipv4Addr = addr.parse().unwrap();
        self.answers
            .push(Record::from_rdata(name(owner), 60, RData::A(A(ip))));
        self
    }

    pub fn aaaa(mut self, owner: &str, addr: &str) -> Self {
        let ip: Ipv6Addr = addr.parse().unwrap();
        self.answers
            .push(Record::from_rdata(name(owner), 60, RData::AAAA(AAAA(ip))));
        self
    }

    pub fn cname(mut self, owner: &str, target: &str) -> Self {
        self.answers.push(Record::from_rdata(
            name(owner),
            60,
            RData::CNAME(CNAME(name(target))),
        ));
        self
    }

    pub fn txt(mut self, owner: &str, text: &str) -> Self {
        self.answers.push(Record::from_rdata(
            name(owner),
            60,
            RData::TXT(TXT::new(vec![text.to_string()])),
        ));
        self
    }

    pub fn request(&self) -> Message {
        self.request.clone()
    }

    pub fn response(&self) -> Message {
        let mut response = Message::new(
            self.request.id(),
            MessageType::Response,
            self.request.op_code(),
        );
        response
            .set_recursion_desired(true)
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NoError)
            .add_queries(self.request.queries().to_vec())
            .add_answers(self.answers.clone());
        response
    }
}
