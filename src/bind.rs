/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! The defaulting pass over a configuration tree.
//!
//! Binding consumes a node and returns the normalized node: every string field
//! has its placeholder resolved, every required child is present, and every
//! present child has been bound in turn. Binding a bound node returns an equal
//! node.

use crate::env::{EnvLookup, ProcessEnv};

pub trait Bind: Sized {
    /// Binds the node against the given environment.
    fn bind_with<E: EnvLookup + ?Sized>(self, env: &E) -> Self;

    /// Binds the node against the process environment.
    fn bind(self) -> Self {
        self.bind_with(&ProcessEnv)
    }
}

/// Replaces an absent child with its default value and binds it.
pub fn bind_or_default<T, E>(child: Option<T>, env: &E) -> Option<T>
where
    T: Bind + Default,
    E: EnvLookup + ?Sized,
{
    Some(child.unwrap_or_default().bind_with(env))
}

/// Binds a child only when it is present.
///
/// Used for children whose absence switches a feature off.
pub fn bind_present<T, E>(child: Option<T>, env: &E) -> Option<T>
where
    T: Bind,
    E: EnvLookup + ?Sized,
{
    child.map(|child| child.bind_with(env))
}

/// Binds every element of a sequence of nodes.
pub fn bind_each<T, E>(children: Vec<T>, env: &E) -> Vec<T>
where
    T: Bind,
    E: EnvLookup + ?Sized,
{
    children
        .into_iter()
        .map(|child| child.bind_with(env))
        .collect()
}
