//! TCP Client
//!
//! Blocking client for the directory protocol, one request in flight at a time.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::directory::{BatchLookup, User, UserId};
use crate::error::{DirectoryError, Result};
use crate::protocol::{read_response, write_request, Reply, Request};

/// Connection to a directory server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .map_err(|e| DirectoryError::Network(format!("failed to connect: {}", e)))?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Bound how long a call waits for the server's reply
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)?;
        self.writer.get_ref().set_write_timeout(timeout)?;
        Ok(())
    }

    /// Send one request and wait for its reply
    pub fn call(&mut self, request: &Request) -> Result<Reply> {
        write_request(&mut self.writer, request)?;
        read_response(&mut self.reader)?.into_reply()
    }

    pub fn get_user(&mut self, id: UserId) -> Result<User> {
        match self.call(&Request::GetUser { id })? {
            Reply::User(user) => Ok(user),
            other => Err(unexpected("GetUser", &other)),
        }
    }

    pub fn get_users(&mut self, ids: &[UserId]) -> Result<BatchLookup> {
        let request = Request::GetUsers { ids: ids.to_vec() };
        match self.call(&request)? {
            Reply::Batch {
                users,
                not_found_ids,
            } => Ok(BatchLookup {
                found: users,
                missing: not_found_ids,
            }),
            other => Err(unexpected("GetUsers", &other)),
        }
    }

    pub fn get_all_users(&mut self) -> Result<Vec<User>> {
        match self.call(&Request::GetAllUsers)? {
            Reply::Users(users) => Ok(users),
            other => Err(unexpected("GetAllUsers", &other)),
        }
    }

    pub fn search_users(&mut self, query: &str) -> Result<Vec<User>> {
        let request = Request::SearchUsers {
            query: query.to_string(),
        };
        match self.call(&request)? {
            Reply::Users(users) => Ok(users),
            other => Err(unexpected("SearchUsers", &other)),
        }
    }

    pub fn ping(&mut self) -> Result<()> {
        match self.call(&Request::Ping)? {
            Reply::Pong => Ok(()),
            other => Err(unexpected("Ping", &other)),
        }
    }
}

fn unexpected(request: &str, reply: &Reply) -> DirectoryError {
    DirectoryError::Protocol(format!("unexpected reply to {}: {:?}", request, reply))
}
